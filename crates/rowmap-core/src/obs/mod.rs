//! Observability: per-thread mapping counters and the sink abstraction
//! that feeds them.

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::{MapCounters, MetricsReport, MetricsState};
pub use sink::{
    MapMode, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
