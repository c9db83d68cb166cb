use rowmap::{
    model::UNSET_ORDER,
    prelude::*,
    value::ValueKind,
};

#[derive(Debug, Default, FromRow, PartialEq)]
#[row(rename_all = "PascalCase")]
struct Person {
    id: i32,
    name: String,
    created_at: Option<Timestamp>,
}

#[derive(Debug, Default, FromRow, PartialEq)]
struct Invoice {
    #[column(name = "invoice_no")]
    number: u64,

    #[column(order = 2)]
    total: f64,

    paid: bool,
    due: Option<Date>,

    #[column(skip)]
    note: String,
}

#[derive(Debug, Default, FromRow, PartialEq)]
struct Marker {
    #[column(skip)]
    cache: Vec<u8>,
}

#[derive(Debug, Default, FromRow, PartialEq)]
struct Aliased {
    #[column(name = "Code")]
    code_text: String,

    #[column(name = "code")]
    code_num: i64,
}

#[derive(Debug, Default, FromRow)]
struct Reading<T: FieldValue + Default> {
    value: T,
}

#[test]
fn derived_model_lists_fields_in_declaration_order() {
    let model = Person::row_model();
    let columns: Vec<_> = model.fields().iter().map(|f| (f.name, f.column)).collect();

    assert_eq!(model.name(), "Person");
    assert_eq!(
        columns,
        [("id", "Id"), ("name", "Name"), ("created_at", "CreatedAt")]
    );
}

#[test]
fn derived_model_carries_kinds_orders_and_nullability() {
    let model = Invoice::row_model();

    let number = model.field("number").unwrap();
    assert_eq!(number.column, "invoice_no");
    assert_eq!(number.kind, ValueKind::Uint64);
    assert_eq!(number.order, UNSET_ORDER);

    let total = model.field("total").unwrap();
    assert_eq!(total.order, 2);
    assert_eq!(total.kind, ValueKind::Float64);

    let due = model.field("due").unwrap();
    assert!(due.nullable);
    assert_eq!(due.kind, ValueKind::Date);

    assert!(model.field("note").is_none());
}

#[test]
fn maps_the_canonical_scenario() {
    let mut cursor = MemoryCursor::new(
        ["Id", "Name", "CreatedAt"],
        vec![vec![
            Value::Int(1),
            Value::from("Alice"),
            Value::from("2024-01-01"),
        ]],
    );

    let people: Vec<Person> = cursor.map_rows().unwrap();

    assert_eq!(people.len(), 1);
    assert_eq!(people[0].id, 1);
    assert_eq!(people[0].name, "Alice");
    assert_eq!(
        people[0].created_at.map(|ts| ts.to_string()).as_deref(),
        Some("2024-01-01T00:00:00.000Z")
    );
}

#[test]
fn explicit_names_ordinals_and_skips_apply() {
    let mut cursor = MemoryCursor::new(
        ["INVOICE_NO", "paid", "amount", "total", "due"],
        vec![
            vec![
                Value::from("1001"),
                Value::Int(1),
                Value::from("12.50"),
                Value::Float64(-1.0),
                Value::Null,
            ],
            vec![
                Value::Uint(1002),
                Value::from("false"),
                Value::Float32(3.0),
                Value::Float64(-1.0),
                Value::from("2024-03-31"),
            ],
        ],
    );

    let invoices: Vec<Invoice> = rowmap::map(&mut cursor).unwrap();

    assert_eq!(
        invoices,
        [
            Invoice {
                number: 1001,
                total: 12.5,
                paid: true,
                due: None,
                note: String::new(),
            },
            Invoice {
                number: 1002,
                total: 3.0,
                paid: false,
                due: Date::new_checked(2024, 3, 31),
                note: String::new(),
            },
        ]
    );
}

#[test]
fn generic_targets_derive() {
    let mut cursor = MemoryCursor::new(["value"], vec![vec![Value::from("7")], vec![Value::Null]]);

    let readings: Vec<Reading<Option<i16>>> = rowmap::map(&mut cursor).unwrap();

    assert_eq!(readings[0].value, Some(7));
    assert_eq!(readings[1].value, None);
}

#[test]
fn fully_skipped_targets_map_to_defaults() {
    let mut cursor = MemoryCursor::new(["cache"], vec![vec![Value::Int(1)], vec![Value::Int(2)]]);

    let markers: Vec<Marker> = rowmap::map(&mut cursor).unwrap();

    assert_eq!(markers, [Marker::default(), Marker::default()]);
}

#[test]
fn columns_named_in_different_case_feed_both_fields() {
    let mut cursor = MemoryCursor::new(["code"], vec![vec![Value::from("17")]]);

    let rows: Vec<Aliased> = rowmap::map(&mut cursor).unwrap();

    assert_eq!(
        rows,
        [Aliased {
            code_text: "17".to_string(),
            code_num: 17,
        }]
    );
}

#[test]
fn lazy_mapping_through_the_facade_honours_cancellation() {
    let token = CancellationToken::new();
    let mut cursor = MemoryCursor::new(
        ["Id", "Name"],
        vec![
            vec![Value::Int(1), Value::from("a")],
            vec![Value::Int(2), Value::from("b")],
            vec![Value::Int(3), Value::from("c")],
        ],
    );

    let mut seen = Vec::new();
    for row in cursor.map_rows_lazy::<Person>(token.clone()).unwrap() {
        match row {
            Ok(person) => {
                seen.push(person.id);
                if person.id == 2 {
                    token.cancel();
                }
            }
            Err(err) => {
                assert!(err.is_cancelled());
                break;
            }
        }
    }

    assert_eq!(seen, [1, 2]);
}

#[test]
fn mapper_options_load_from_toml() {
    let options = MapOptions::from_toml_str("case_insensitive = false").unwrap();
    let mut cursor = MemoryCursor::new(["id", "Name"], vec![vec![Value::Int(4), Value::from("d")]]);

    let people: Vec<Person> = Mapper::new(options).map(&mut cursor).unwrap();

    assert_eq!(people[0].id, 0);
    assert_eq!(people[0].name, "d");
}

#[test]
fn conversion_errors_name_the_failing_field() {
    let mut cursor = MemoryCursor::new(["Id"], vec![vec![Value::Int(i64::from(i32::MAX) + 1)]]);

    let err = rowmap::map::<Person, _>(&mut cursor).unwrap_err();
    let conversion = err.as_conversion().unwrap();

    assert_eq!(conversion.field, "id");
    assert_eq!(conversion.column, "Id");
    assert!(err.display_with_class().starts_with("conversion: Person.id"));
}
