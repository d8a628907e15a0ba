// Metrics hooks for the `matcher` crate.
//
// Callers install a global `FilterMetrics` implementation via
// [`set_filter_metrics`]; the lookup engine and the seeker matcher then report
// latency, input size, hit count and skipped predicates for every call. This
// keeps instrumentation decoupled from any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;

/// Which filter path produced a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Lookup,
    Seeker,
}

/// One filter call, as seen by a metrics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSample {
    pub kind: FilterKind,
    pub latency: Duration,
    /// Profiles in the snapshot.
    pub candidates: usize,
    /// Profiles returned.
    pub hits: usize,
    /// Predicates supplied but not applied.
    pub skipped: usize,
}

/// Metrics observer for filter operations.
pub trait FilterMetrics: Send + Sync {
    fn record_filter(&self, sample: FilterSample);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn FilterMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn FilterMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn FilterMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

pub(crate) fn record(sample: FilterSample) {
    if let Some(recorder) = metrics_recorder() {
        recorder.record_filter(sample);
    }
}

/// Install or clear the global filter metrics recorder.
///
/// Typically called once during service startup.
pub fn set_filter_metrics(recorder: Option<Arc<dyn FilterMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
