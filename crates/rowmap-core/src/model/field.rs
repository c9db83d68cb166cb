use crate::{
    traits::FieldValue,
    value::{CoercionError, Value, ValueKind},
};
use std::fmt;

/// Ordinal sentinel meaning "no positional override".
pub const UNSET_ORDER: i32 = -1;

/// Compiled assignment of a non-null value into one field.
pub type FieldSetter<T> = fn(&mut T, Value) -> Result<(), CoercionError>;

/// Compiled assignment of the field's null representation.
pub type NullSetter<T> = fn(&mut T);

///
/// FieldModel
///
/// Runtime metadata for one mappable field of `T`.
///

pub struct FieldModel<T> {
    /// Field name as declared on the target type.
    pub name: &'static str,
    /// Column the field reads from when bound by name.
    pub column: &'static str,
    /// Positional override, `UNSET_ORDER` when absent.
    pub order: i32,
    /// Coercion target (optional wrapper stripped).
    pub kind: ValueKind,
    pub nullable: bool,
    pub set: FieldSetter<T>,
    pub set_null: NullSetter<T>,
}

impl<T> FieldModel<T> {
    /// Field reading from a column of the same name, without an ordinal
    /// override.
    #[must_use]
    pub const fn new(
        name: &'static str,
        kind: ValueKind,
        set: FieldSetter<T>,
        set_null: NullSetter<T>,
    ) -> Self {
        Self {
            name,
            column: name,
            order: UNSET_ORDER,
            kind,
            nullable: false,
            set,
            set_null,
        }
    }

    /// Field typed by its `FieldValue` impl; kind and nullability come from
    /// the type.
    #[must_use]
    pub fn of<V: FieldValue>(
        name: &'static str,
        set: FieldSetter<T>,
        set_null: NullSetter<T>,
    ) -> Self {
        Self::new(name, V::KIND, set, set_null).with_nullable(V::NULLABLE)
    }

    #[must_use]
    pub const fn with_column(mut self, column: &'static str) -> Self {
        self.column = column;
        self
    }

    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Ordinal override, if one is set.
    ///
    /// Negative values other than the sentinel are rejected by the planner
    /// and also read as "unset" here.
    #[must_use]
    pub fn order_override(&self) -> Option<usize> {
        if self.order == UNSET_ORDER {
            return None;
        }

        usize::try_from(self.order).ok()
    }
}

impl<T> Clone for FieldModel<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldModel<T> {}

impl<T> fmt::Debug for FieldModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldModel")
            .field("name", &self.name)
            .field("column", &self.column)
            .field("order", &self.order)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}
