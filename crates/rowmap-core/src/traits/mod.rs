
use crate::{
    model::RowModel,
    types::{Date, Timestamp},
    value::{CoercionError, Value, ValueKind, coerce},
};

///
/// FromRow
///
/// A record type that can be materialized from one cursor row.
/// `Default` stands in for the parameterless constructor: every field the
/// plan does not bind keeps its default.
///

pub trait FromRow: Default + Sized {
    /// Declarative field table for this type, built once per mapping call.
    fn row_model() -> RowModel<Self>;
}

///
/// FieldValue
///
/// Assignment boundary between a cursor `Value` and a typed field.
///
/// `from_value` takes the fast path when the value already has the field's
/// exact kind and otherwise routes through [`coerce`]. `null` is the
/// representation a field takes when its cell is SQL NULL.
///

pub trait FieldValue: Sized {
    /// Coercion target; `Option` wrappers report their inner kind.
    const KIND: ValueKind;

    /// True when SQL NULL maps to a distinct value (`Option::None`).
    const NULLABLE: bool = false;

    fn from_value(value: Value) -> Result<Self, CoercionError>;

    #[must_use]
    fn null() -> Self;
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }

    fn null() -> Self {
        None
    }
}

// Integers travel as `Value::Int` / `Value::Uint`. A carrier of the right
// sign skips `coerce` and only pays the width check.
macro_rules! impl_field_value_int {
    ( $carrier:ident: $( $type:ty => $kind:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                const KIND: ValueKind = ValueKind::$kind;

                fn from_value(value: Value) -> Result<Self, CoercionError> {
                    let from = value.kind().unwrap_or(Self::KIND);
                    let carried = match value {
                        Value::$carrier(n) => n,
                        value => match coerce(value, Self::KIND)? {
                            Value::$carrier(n) => n,
                            other => return Err(mismatch(&other, Self::KIND)),
                        },
                    };

                    <$type>::try_from(carried).map_err(|_| CoercionError::OutOfRange {
                        from,
                        to: Self::KIND,
                        value: carried.to_string(),
                    })
                }

                fn null() -> Self {
                    0
                }
            }
        )*
    };
}

impl_field_value_int! {
    Int:
    i8  => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
}

impl_field_value_int! {
    Uint:
    u8  => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
}

// Non-integer scalars: exact variant is moved in, anything else is coerced.
macro_rules! impl_field_value_scalar {
    ( $( $type:ty => $kind:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                const KIND: ValueKind = ValueKind::$kind;

                fn from_value(value: Value) -> Result<Self, CoercionError> {
                    match value {
                        Value::$kind(v) => Ok(v),
                        value => match coerce(value, Self::KIND)? {
                            Value::$kind(v) => Ok(v),
                            other => Err(mismatch(&other, Self::KIND)),
                        },
                    }
                }

                fn null() -> Self {
                    Self::default()
                }
            }
        )*
    };
}

impl_field_value_scalar! {
    bool      => Bool,
    f32       => Float32,
    f64       => Float64,
    String    => Text,
    Vec<u8>   => Blob,
    Date      => Date,
    Timestamp => Timestamp,
}

fn mismatch(value: &Value, to: ValueKind) -> CoercionError {
    match value.kind() {
        Some(from) => CoercionError::Unsupported { from, to },
        None => CoercionError::Null { to },
    }
}
