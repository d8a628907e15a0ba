//! Workspace umbrella crate for Vivaha profile search.
//!
//! This crate stitches the criteria state machine, the profile store and the
//! matcher together so callers can drive a search form and run searches
//! through a single API.
//!
//! - [`SearchForm`] runs the criteria components in response to form events.
//! - [`SearchPipeline`] runs open lookups and seeker searches over a store.
//! - [`VivahaConfig`] loads every component's settings from one YAML file.
//!
//! ```
//! use std::sync::Arc;
//!
//! use vivaha::{
//!     CriteriaState, InMemoryStore, Profile, SearchMode, SearchPipeline, VivahaConfig,
//! };
//!
//! let store = InMemoryStore::with_profiles(vec![
//!     Profile::new("1", "VM-001", "Lakshmi", "Female", "1996-04-12"),
//!     Profile::new("2", "VM-002", "Arjun", "Male", "1992-11-02"),
//! ]);
//! let pipeline = SearchPipeline::new(Arc::new(store), &VivahaConfig::default());
//!
//! let mut state = CriteriaState::with_mode(SearchMode::Serial);
//! state.serial_no = "VM-002".into();
//! let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let outcome = pipeline.search(&state, today).unwrap();
//! assert_eq!(outcome.matches[0].serial_no, "VM-001");
//! ```

pub mod config;
pub mod pipeline;
pub mod session;

pub use criteria::{
    AgeBounds, AgePolicy, AgePreferenceComputer, AgePreferenceSpec, CompatibilityGateResolver,
    CriteriaConfig, CriteriaError, CriteriaState, CriteriaValidator, Field, FieldDisposition,
    FieldError, FieldPlan, Gender, ModeSwitch, ModeVisibilityController, RasiGate, SearchMode,
    StructuralError, ValidatedCriteria,
};
pub use matcher::{
    CandidateFilterEngine, CompatibilityChart, FilterConfig, FilterOutcome, FilterReport,
    GenderMatch, MatchError, RawCriteria, SeekerMatcher, SeekerOutcome, SeekerProfile,
};
pub use store::{InMemoryStore, JsonFileStore, Profile, ProfileStore, StoreConfig, StoreError};

pub use crate::config::{ConfigLoadError, VivahaConfig};
pub use crate::pipeline::SearchPipeline;
pub use crate::session::{FormPlan, InputError, SearchForm, Submission};

use thiserror::Error;

/// Errors that can occur while running a search end to end.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("criteria rejected: {0}")]
    Criteria(#[from] CriteriaError),
    #[error("profile store failure: {0}")]
    Store(#[from] StoreError),
    #[error("matching failed: {0}")]
    Match(#[from] MatchError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigLoadError),
}
