use crate::{
    obs::{
        MapMode, MetricsEvent, metrics_report, metrics_reset_all,
        sink::{Span, record},
        with_metrics_sink,
    },
    test_fixtures::CaptureSink,
};
use std::rc::Rc;

#[test]
fn global_sink_accumulates_per_target_and_totals() {
    metrics_reset_all();

    record(MetricsEvent::PlanBuilt {
        target: "Person",
        fields: 3,
        name_bound: 2,
        ordinal_bound: 1,
    });
    record(MetricsEvent::ConversionFailed { target: "Person" });
    record(MetricsEvent::Cancelled { target: "Order" });

    let report = metrics_report();
    let person = &report.targets["Person"];

    assert_eq!(person.plans_built, 1);
    assert_eq!(person.fields_planned, 3);
    assert_eq!(person.fields_bound_by_name, 2);
    assert_eq!(person.fields_bound_by_ordinal, 1);
    assert_eq!(person.conversion_failures, 1);
    assert_eq!(report.targets["Order"].cancellations, 1);
    assert_eq!(report.totals.cancellations, 1);
    assert_eq!(report.totals.conversion_failures, 1);
}

#[test]
fn span_reports_start_and_rows_on_drop() {
    metrics_reset_all();

    {
        let mut span = Span::new(MapMode::Lazy, "Person");
        span.add_row();
        span.add_row();
        assert_eq!(span.rows(), 2);
    }

    let report = metrics_report();

    assert_eq!(report.totals.lazy_calls, 1);
    assert_eq!(report.totals.eager_calls, 0);
    assert_eq!(report.totals.rows_mapped, 2);
    assert_eq!(report.targets["Person"].sessions_finished, 1);
}

#[test]
fn sink_override_diverts_events_and_is_restored() {
    metrics_reset_all();
    let sink = Rc::new(CaptureSink::default());

    with_metrics_sink(sink.clone(), || {
        let _span = Span::new(MapMode::Eager, "Person");
    });

    assert_eq!(
        sink.events(),
        [
            MetricsEvent::MapStart {
                mode: MapMode::Eager,
                target: "Person",
            },
            MetricsEvent::MapFinish {
                mode: MapMode::Eager,
                target: "Person",
                rows: 0,
            },
        ]
    );
    assert_eq!(metrics_report().totals.eager_calls, 0);

    // override gone: global counters see the next event
    record(MetricsEvent::Cancelled { target: "Person" });
    assert_eq!(metrics_report().totals.cancellations, 1);
}

#[test]
fn reset_clears_everything() {
    record(MetricsEvent::Cancelled { target: "Person" });
    metrics_reset_all();

    assert_eq!(metrics_report(), Default::default());
}

#[test]
fn report_serializes_to_json() {
    metrics_reset_all();
    record(MetricsEvent::ConversionFailed { target: "Person" });

    let json = serde_json::to_value(metrics_report()).unwrap();

    assert_eq!(json["targets"]["Person"]["conversion_failures"], 1);
}
