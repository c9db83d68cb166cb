use crate::{
    cursor::{Cursor, CursorError, MemoryCursor},
    error::{ErrorClass, MapError},
    mapper::{CursorExt, Mapper, map, map_lazy},
    model::RowModel,
    obs::{MapMode, MetricsEvent, metrics_report, metrics_reset_all, with_metrics_sink},
    options::MapOptions,
    test_fixtures::{CaptureSink, Person, field, people},
    traits::FromRow,
    types::{Date, Timestamp},
    value::Value,
};
use proptest::prelude::*;
use std::rc::Rc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default, PartialEq)]
struct Named {
    name: String,
}

impl FromRow for Named {
    fn row_model() -> RowModel<Self> {
        RowModel::<Self>::builder("Named")
            .field(field!(Named, name: String).with_column("Name"))
            .build()
    }
}

#[test]
fn maps_id_name_created_at() {
    let mut cursor = MemoryCursor::new(
        ["Id", "Name", "CreatedAt"],
        vec![vec![Value::Int(1), Value::from("Alice"), Value::from("2024-01-01")]],
    );

    let rows: Vec<Person> = map(&mut cursor).unwrap();

    assert_eq!(
        rows,
        [Person {
            id: 1,
            name: "Alice".to_string(),
            created_at: Some(Timestamp::from_date(Date::new_checked(2024, 1, 1).unwrap())),
        }]
    );
}

#[test]
fn unmatched_fields_keep_their_default() {
    let mut cursor = MemoryCursor::new(
        ["id", "extra"],
        vec![vec![Value::Int(3), Value::from("ignored")]],
    );

    let rows: Vec<Named> = map(&mut cursor).unwrap();

    assert_eq!(rows, [Named::default()]);
}

#[derive(Debug, Default, PartialEq)]
struct Marker;

impl FromRow for Marker {
    fn row_model() -> RowModel<Self> {
        RowModel::<Self>::builder("Marker").build()
    }
}

#[test]
fn targets_without_fields_map_one_default_per_row() {
    let mut cursor = people();

    let rows: Vec<Marker> = map(&mut cursor).unwrap();

    assert_eq!(rows, [Marker, Marker]);
}

#[test]
fn numeric_text_converts() {
    let mut cursor = MemoryCursor::new(["ID"], vec![vec![Value::from("42")]]);

    let rows = cursor.map_rows::<Person>().unwrap();

    assert_eq!(rows[0].id, 42);
}

#[test]
fn empty_cursor_maps_to_nothing() {
    let mut cursor = MemoryCursor::new(["Id", "Name"], Vec::new());

    assert!(map::<Person, _>(&mut cursor).unwrap().is_empty());
}

#[test]
fn remapping_a_reset_cursor_is_idempotent() {
    let mut cursor = people();

    let first: Vec<Person> = map(&mut cursor).unwrap();
    cursor.reset();
    let second: Vec<Person> = map(&mut cursor).unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn eager_failure_discards_earlier_rows() {
    let mut cursor = MemoryCursor::new(
        ["Id"],
        vec![vec![Value::Int(1)], vec![Value::from("two")], vec![Value::Int(3)]],
    );

    let err = map::<Person, _>(&mut cursor).unwrap_err();

    assert_eq!(err.class(), ErrorClass::Conversion);
    assert_eq!(err.as_conversion().unwrap().row, 1);
}

#[test]
fn configuration_errors_precede_any_read() {
    let model = RowModel::<Person>::builder("Person")
        .field(field!(Person, id: i32).with_column("Key"))
        .field(field!(Person, name: String).with_column("key"))
        .build();
    let mut cursor = people();

    let err = Mapper::default().map_model(model, &mut cursor).unwrap_err();

    assert_eq!(err.class(), ErrorClass::Configuration);
    // cursor untouched: the first advance still lands on row one
    assert!(cursor.advance().unwrap());
    assert_eq!(cursor.value_at(0).unwrap(), Value::Int(1));
}

#[test]
fn refused_introspection_maps_ordinal_fields_only() {
    let model = RowModel::<Person>::builder("Person")
        .field(field!(Person, id: i32).with_column("Id").with_order(0))
        .field(field!(Person, name: String).with_column("Name"))
        .build();
    let mut cursor = people().without_introspection();

    let rows = Mapper::default().map_model(model, &mut cursor).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[0].name, "");
}

#[test]
fn case_sensitive_options_skip_mismatched_spelling() {
    let mut cursor = MemoryCursor::new(["id", "Name"], vec![vec![Value::Int(9), Value::from("x")]]);
    let mapper = Mapper::new(MapOptions::default().with_case_insensitive(false));

    let rows: Vec<Person> = mapper.map(&mut cursor).unwrap();

    assert_eq!(rows[0].id, 0);
    assert_eq!(rows[0].name, "x");
}

#[test]
fn lazy_yields_rows_in_order_then_ends() {
    let mut cursor = people();
    let mut rows = map_lazy::<Person, _>(&mut cursor, CancellationToken::new()).unwrap();

    assert_eq!(rows.next().unwrap().unwrap().name, "Alice");
    assert_eq!(rows.next().unwrap().unwrap().name, "Bob");
    assert!(rows.next().is_none());
    assert!(rows.next().is_none());
    assert!(rows.is_finished());
    assert_eq!(rows.rows(), 2);
}

#[test]
fn lazy_cancellation_stops_before_the_next_row() {
    let token = CancellationToken::new();
    let mut cursor = people();
    let mut rows = cursor.map_rows_lazy::<Person>(token.clone()).unwrap();

    assert_eq!(rows.next().unwrap().unwrap().id, 1);
    token.cancel();

    let err = rows.next().unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert!(rows.next().is_none());
    drop(rows);

    // the cancelled pull never advanced: row two is still next
    assert!(cursor.advance().unwrap());
    assert_eq!(cursor.value_at(1).unwrap(), Value::from("Bob"));
}

#[test]
fn lazy_cancelled_before_start_yields_only_the_error() {
    let token = CancellationToken::new();
    token.cancel();
    let mut cursor = people();

    let results: Vec<_> = map_lazy::<Person, _>(&mut cursor, token).unwrap().collect();

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(MapError::Cancelled)));
}

#[test]
fn lazy_failure_keeps_prior_rows_and_fuses() {
    let mut cursor = MemoryCursor::new(
        ["Id"],
        vec![vec![Value::Int(1)], vec![Value::from("bad")], vec![Value::Int(3)]],
    );

    let results: Vec<_> = map_lazy::<Person, _>(&mut cursor, CancellationToken::new())
        .unwrap()
        .collect();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().id, 1);
    assert!(matches!(results[1], Err(MapError::Conversion(_))));
}

#[test]
fn lazy_configuration_errors_surface_at_the_call() {
    let model = RowModel::<Person>::builder("Person").build();
    let mut cursor = people();

    let err = Mapper::default()
        .map_model_lazy(model, &mut cursor, CancellationToken::new())
        .unwrap_err();

    assert!(matches!(err, MapError::Configuration(_)));
}

#[test]
fn lazy_cursor_failures_are_yielded() {
    struct Broken;

    impl Cursor for Broken {
        fn field_count(&self) -> usize {
            0
        }

        fn column_name(&self, ordinal: usize) -> Result<&str, CursorError> {
            Err(CursorError::OrdinalOutOfRange { ordinal, count: 0 })
        }

        fn advance(&mut self) -> Result<bool, CursorError> {
            Err(CursorError::driver(std::io::Error::other("connection reset")))
        }

        fn value_by_name(&self, name: &str) -> Result<Value, CursorError> {
            Err(CursorError::ColumnNotFound {
                name: name.to_string(),
            })
        }

        fn value_at(&self, ordinal: usize) -> Result<Value, CursorError> {
            Err(CursorError::OrdinalOutOfRange { ordinal, count: 0 })
        }
    }

    let mut cursor = Broken;
    let results: Vec<_> = map_lazy::<Person, _>(&mut cursor, CancellationToken::new())
        .unwrap()
        .collect();

    assert_eq!(results.len(), 1);
    let err = results[0].as_ref().unwrap_err();
    assert_eq!(err.class(), ErrorClass::Cursor);
    assert_eq!(err.to_string(), "connection reset");
}

#[test]
fn boxed_cursors_map_through_the_trait_object() {
    let mut cursor: Box<dyn Cursor> = Box::new(people());

    let rows: Vec<Person> = map(&mut cursor).unwrap();

    assert_eq!(rows.len(), 2);
}

#[test]
fn sessions_report_start_plan_rows_and_finish() {
    let sink = Rc::new(CaptureSink::default());

    with_metrics_sink(sink.clone(), || {
        let mut cursor = people();
        map::<Person, _>(&mut cursor).unwrap();
    });

    assert_eq!(
        sink.events(),
        [
            MetricsEvent::MapStart {
                mode: MapMode::Eager,
                target: "Person",
            },
            MetricsEvent::PlanBuilt {
                target: "Person",
                fields: 3,
                name_bound: 3,
                ordinal_bound: 0,
            },
            MetricsEvent::RowMapped { target: "Person" },
            MetricsEvent::RowMapped { target: "Person" },
            MetricsEvent::MapFinish {
                mode: MapMode::Eager,
                target: "Person",
                rows: 2,
            },
        ]
    );
}

#[test]
fn global_counters_track_lazy_cancellation() {
    metrics_reset_all();
    let token = CancellationToken::new();
    let mut cursor = people();

    {
        let mut rows = map_lazy::<Person, _>(&mut cursor, token.clone()).unwrap();
        rows.next();
        token.cancel();
        rows.next();
    }

    let person = &metrics_report().targets["Person"];
    assert_eq!(person.lazy_calls, 1);
    assert_eq!(person.rows_mapped, 1);
    assert_eq!(person.cancellations, 1);
    assert_eq!(person.sessions_finished, 1);
}

proptest! {
    #[test]
    fn eager_mapping_preserves_row_order(ids in prop::collection::vec(any::<i32>(), 0..40)) {
        let rows = ids.iter().map(|id| vec![Value::from(*id)]).collect();
        let mut cursor = MemoryCursor::new(["Id"], rows);

        let mapped: Vec<Person> = map(&mut cursor).unwrap();
        let mapped_ids: Vec<i32> = mapped.iter().map(|p| p.id).collect();

        prop_assert_eq!(mapped_ids, ids);
    }

    #[test]
    fn lazy_and_eager_agree(ids in prop::collection::vec(any::<i64>().prop_map(|n| n % 1000), 0..20)) {
        let rows: Vec<Vec<Value>> = ids.iter().map(|id| vec![Value::Int(*id), Value::from(id.to_string())]).collect();
        let mut eager_cursor = MemoryCursor::new(["Id", "Name"], rows.clone());
        let mut lazy_cursor = MemoryCursor::new(["Id", "Name"], rows);

        let eager: Vec<Person> = map(&mut eager_cursor).unwrap();
        let lazy: Vec<Person> = map_lazy::<Person, _>(&mut lazy_cursor, CancellationToken::new())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        prop_assert_eq!(eager, lazy);
    }
}
