use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// MetricsState
/// Ephemeral, in-memory counters for mapping sessions.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MetricsState {
    pub totals: MapCounters,
    pub targets: BTreeMap<String, MapCounters>,
}

///
/// MapCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MapCounters {
    // Session entrypoints
    pub eager_calls: u64,
    pub lazy_calls: u64,
    pub sessions_finished: u64,

    // Planner
    pub plans_built: u64,
    pub fields_planned: u64,
    pub fields_bound_by_name: u64,
    pub fields_bound_by_ordinal: u64,

    // Rows
    pub rows_mapped: u64,
    pub conversion_failures: u64,
    pub cancellations: u64,
}

/// Snapshot handed out by `metrics_report`.
pub type MetricsReport = MetricsState;

thread_local! {
    static METRICS_STATE: RefCell<MetricsState> = RefCell::new(MetricsState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&MetricsState) -> R) -> R {
    METRICS_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut MetricsState) -> R) -> R {
    METRICS_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Apply `f` to the totals and to the counters of `target`.
pub(crate) fn bump(target: &str, f: impl Fn(&mut MapCounters)) {
    with_state_mut(|m| {
        f(&mut m.totals);
        f(m.targets.entry(target.to_string()).or_default());
    });
}

#[must_use]
pub(crate) fn report() -> MetricsReport {
    with_state(Clone::clone)
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = MetricsState::default());
}
