//! Metrics sink boundary.
//!
//! Mapping logic never touches `obs::metrics` directly; all instrumentation
//! flows through `MetricsEvent` and `MetricsSink`.

use crate::obs::metrics::{self, MetricsReport};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MapMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MapMode {
    Eager,
    Lazy,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    MapStart {
        mode: MapMode,
        target: &'static str,
    },
    PlanBuilt {
        target: &'static str,
        fields: u64,
        name_bound: u64,
        ordinal_bound: u64,
    },
    RowMapped {
        target: &'static str,
    },
    ConversionFailed {
        target: &'static str,
    },
    Cancelled {
        target: &'static str,
    },
    MapFinish {
        mode: MapMode,
        target: &'static str,
        rows: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the global counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::MapStart { mode, target } => {
                metrics::bump(target, |c| match mode {
                    MapMode::Eager => c.eager_calls = c.eager_calls.saturating_add(1),
                    MapMode::Lazy => c.lazy_calls = c.lazy_calls.saturating_add(1),
                });
            }

            MetricsEvent::PlanBuilt {
                target,
                fields,
                name_bound,
                ordinal_bound,
            } => {
                metrics::bump(target, |c| {
                    c.plans_built = c.plans_built.saturating_add(1);
                    c.fields_planned = c.fields_planned.saturating_add(fields);
                    c.fields_bound_by_name = c.fields_bound_by_name.saturating_add(name_bound);
                    c.fields_bound_by_ordinal =
                        c.fields_bound_by_ordinal.saturating_add(ordinal_bound);
                });
            }

            MetricsEvent::RowMapped { target } => {
                metrics::bump(target, |c| c.rows_mapped = c.rows_mapped.saturating_add(1));
            }

            MetricsEvent::ConversionFailed { target } => {
                metrics::bump(target, |c| {
                    c.conversion_failures = c.conversion_failures.saturating_add(1);
                });
            }

            MetricsEvent::Cancelled { target } => {
                metrics::bump(target, |c| {
                    c.cancellations = c.cancellations.saturating_add(1);
                });
            }

            MetricsEvent::MapFinish { target, .. } => {
                metrics::bump(target, |c| {
                    c.sessions_finished = c.sessions_finished.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's metrics.
#[must_use]
pub fn metrics_report() -> MetricsReport {
    metrics::report()
}

/// Reset all metrics counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous sink is restored on every exit, including unwind.
pub fn with_metrics_sink<R>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> R) -> R {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that emits start/finish events for one mapping session.
/// Ensures finish accounting happens even on unwind.

pub(crate) struct Span {
    mode: MapMode,
    target: &'static str,
    rows: u64,
}

impl Span {
    #[must_use]
    pub(crate) fn new(mode: MapMode, target: &'static str) -> Self {
        record(MetricsEvent::MapStart { mode, target });

        Self {
            mode,
            target,
            rows: 0,
        }
    }

    pub(crate) fn add_row(&mut self) {
        self.rows = self.rows.saturating_add(1);
        record(MetricsEvent::RowMapped {
            target: self.target,
        });
    }

    pub(crate) const fn rows(&self) -> u64 {
        self.rows
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        record(MetricsEvent::MapFinish {
            mode: self.mode,
            target: self.target,
            rows: self.rows,
        });
    }
}
