//! Row materializer.
//!
//! Builds one instance of the target type from the cursor's current row,
//! following a prepared `BindingPlan`.


use crate::{
    cursor::Cursor,
    error::{ConversionError, MapError},
    obs::sink::{MetricsEvent, record},
    plan::{BindingPlan, ColumnRef},
    value::ValueKind,
};
use tracing::{trace, warn};

///
/// RowMaterializer
///

pub struct RowMaterializer<'p, T> {
    plan: &'p BindingPlan<T>,
}

impl<'p, T: Default> RowMaterializer<'p, T> {
    #[must_use]
    pub const fn new(plan: &'p BindingPlan<T>) -> Self {
        Self { plan }
    }

    /// Materialize the row the cursor is positioned on.
    ///
    /// Fields are assigned in declaration order. Unbound fields keep their
    /// default; NULL cells take the field's null form without conversion.
    /// `row` is the zero-based index reported in conversion errors.
    pub fn materialize<C>(&self, cursor: &C, row: u64) -> Result<T, MapError>
    where
        C: Cursor + ?Sized,
    {
        let field_count = cursor.field_count();
        let mut out = T::default();

        for binding in self.plan.bindings() {
            let Some(source) = binding.source(field_count) else {
                continue;
            };

            let mut value = match source {
                ColumnRef::Ordinal(ordinal) => cursor.value_at(ordinal)?,
                ColumnRef::Name(name) => cursor.value_by_name(name)?,
            };

            if value.is_null() {
                (binding.set_null)(&mut out);
                continue;
            }

            if self.plan.trims_text() && binding.kind() != ValueKind::Text {
                value.trim_text();
            }

            if let Err(source_err) = (binding.set)(&mut out, value) {
                let err = ConversionError {
                    target: self.plan.target(),
                    field: binding.field(),
                    column: column_label(cursor, source),
                    row,
                    source: source_err,
                };

                warn!(
                    target = err.target,
                    field = err.field,
                    column = %err.column,
                    row,
                    error = %err.source,
                    "field conversion failed"
                );
                record(MetricsEvent::ConversionFailed {
                    target: self.plan.target(),
                });

                return Err(err.into());
            }
        }

        trace!(target = self.plan.target(), row, "row materialized");

        Ok(out)
    }
}

// Cursor spelling of the column a value was read from.
fn column_label<C: Cursor + ?Sized>(cursor: &C, source: ColumnRef<'_>) -> String {
    match source {
        ColumnRef::Name(name) => name.to_string(),
        ColumnRef::Ordinal(ordinal) => cursor
            .column_name(ordinal)
            .map_or_else(|_| format!("#{ordinal}"), str::to_string),
    }
}
