use crate::{
    cursor::MemoryCursor,
    model::RowModel,
    obs::{MetricsEvent, MetricsSink},
    traits::FromRow,
    types::Timestamp,
    value::Value,
};
use std::cell::RefCell;

// Hand-written equivalent of what `#[derive(FromRow)]` expands to.
macro_rules! field {
    ($target:ty, $field:ident : $ty:ty) => {
        $crate::model::FieldModel::<$target>::of::<$ty>(
            stringify!($field),
            |row: &mut $target, value: $crate::value::Value| {
                row.$field = $crate::traits::FieldValue::from_value(value)?;
                Ok(())
            },
            |row: &mut $target| row.$field = <$ty as $crate::traits::FieldValue>::null(),
        )
    };
}

pub(crate) use field;

///
/// Person
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Person {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) created_at: Option<Timestamp>,
}

impl FromRow for Person {
    fn row_model() -> RowModel<Self> {
        RowModel::<Self>::builder("Person")
            .field(field!(Person, id: i32).with_column("Id"))
            .field(field!(Person, name: String).with_column("Name"))
            .field(field!(Person, created_at: Option<Timestamp>).with_column("CreatedAt"))
            .build()
    }
}

pub(crate) fn people() -> MemoryCursor {
    MemoryCursor::new(
        ["Id", "Name", "CreatedAt"],
        vec![
            vec![
                Value::Int(1),
                Value::from("Alice"),
                Value::from("2024-01-02T03:04:05Z"),
            ],
            vec![Value::from(" 2 "), Value::from("Bob"), Value::Null],
        ],
    )
}

///
/// CaptureSink
/// Records every event it receives.
///

#[derive(Default)]
pub(crate) struct CaptureSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl CaptureSink {
    pub(crate) fn events(&self) -> Vec<MetricsEvent> {
        self.events.borrow().clone()
    }
}

impl MetricsSink for CaptureSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}
