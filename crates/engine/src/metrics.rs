// Metrics hooks for the engine crate.
//
// Callers install a global `RecommendMetrics` implementation via
// [`set_recommend_metrics`], then `Recommender` reports outcome, latency,
// and result count for every call to `recommend`. This keeps
// instrumentation decoupled from any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::{InsufficiencyReason, Outcome};

/// Metrics observer for recommendation requests.
pub trait RecommendMetrics: Send + Sync {
    /// Record the outcome of one request.
    ///
    /// `reason` is set only for [`Outcome::InsufficientInput`] and
    /// distinguishes its two causes; `returned` is the number of names
    /// handed back to the caller after all filtering and top-up.
    fn record_recommend(
        &self,
        cluster: u32,
        outcome: Outcome,
        reason: Option<InsufficiencyReason>,
        latency: Duration,
        returned: usize,
    );
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn RecommendMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn RecommendMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn RecommendMetrics>> {
    let guard = metrics_lock().read().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global recommendation metrics recorder.
///
/// Typically called once during service startup so every `Recommender`
/// shares the same metrics backend.
pub fn set_recommend_metrics(recorder: Option<Arc<dyn RecommendMetrics>>) {
    let mut guard = metrics_lock().write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
