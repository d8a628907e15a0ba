//! Rasi / Lagnam compatibility gate.
use serde::Serialize;

use crate::types::SearchMode;

pub const RASI_LABEL: &str = "Rasi / Lagnam";
pub const RASI_LABEL_REQUIRED: &str = "Rasi / Lagnam *";

/// Resolved state of the rasi input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RasiGate {
    /// The rasi value takes part in matching.
    pub active: bool,
    pub required: bool,
    /// The input accepts edits.
    pub interactable: bool,
    pub label: &'static str,
}

/// Combines the search mode with the compatibility opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityGateResolver;

impl CompatibilityGateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Active only for a nakshatra search with compatibility switched on.
    /// An uninitialized mode resolves as inactive.
    pub fn resolve(&self, mode: Option<SearchMode>, compatibility_enabled: bool) -> RasiGate {
        let active = compatibility_enabled && mode == Some(SearchMode::Nakshatra);
        RasiGate {
            active,
            required: active,
            interactable: active,
            label: if active { RASI_LABEL_REQUIRED } else { RASI_LABEL },
        }
    }
}
