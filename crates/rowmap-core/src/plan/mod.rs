//! Binding planner.
//!
//! Resolves, once per mapping call, which cursor column feeds each field of
//! the target type. The resulting `BindingPlan` is immutable and shared by
//! every row of the session.

mod column_set;


use crate::{
    model::{FieldSetter, NullSetter, RowModel, UNSET_ORDER},
    obs::sink::{MetricsEvent, record},
    options::MapOptions,
    value::ValueKind,
};
use std::collections::{HashMap, HashSet};
use thiserror::Error as ThisError;
use tracing::debug;

// re-exports
pub use column_set::ColumnSet;

///
/// ConfigurationError
///
/// The target type's field table cannot be compiled into a plan.
/// Raised before any row is read.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConfigurationError {
    #[error("{target}: field '{field}' is declared more than once")]
    DuplicateField {
        target: &'static str,
        field: &'static str,
    },

    #[error("{target}: fields '{first}' and '{second}' both map to column '{column}'")]
    DuplicateColumn {
        target: &'static str,
        column: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("{target}: field '{field}' has invalid column order {order}")]
    InvalidOrder {
        target: &'static str,
        field: &'static str,
        order: i32,
    },
}

///
/// ColumnRef
///
/// Where a field reads its value for one row.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnRef<'a> {
    Ordinal(usize),
    Name(&'a str),
}

///
/// FieldBinding
///

pub struct FieldBinding<T> {
    field: &'static str,
    column: &'static str,
    key: String,
    source_name: Option<String>,
    ordinal: Option<usize>,
    kind: ValueKind,
    nullable: bool,
    pub(crate) set: FieldSetter<T>,
    pub(crate) set_null: NullSetter<T>,
}

impl<T> FieldBinding<T> {
    /// Field name on the target type.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Resolved column name (override or field name).
    #[must_use]
    pub const fn column(&self) -> &'static str {
        self.column
    }

    /// Folded column name used for presence checks.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn ordinal(&self) -> Option<usize> {
        self.ordinal
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// True when the column set contains the resolved name.
    #[must_use]
    pub const fn is_name_bound(&self) -> bool {
        self.source_name.is_some()
    }

    /// Source for a row with `field_count` fields; `None` leaves the field
    /// at its default. Ordinal overrides win when in bounds.
    #[must_use]
    pub fn source(&self, field_count: usize) -> Option<ColumnRef<'_>> {
        match self.ordinal {
            Some(ordinal) if ordinal < field_count => Some(ColumnRef::Ordinal(ordinal)),
            _ => self.source_name.as_deref().map(ColumnRef::Name),
        }
    }
}

impl<T> std::fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("field", &self.field)
            .field("column", &self.column)
            .field("source_name", &self.source_name)
            .field("ordinal", &self.ordinal)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

///
/// BindingPlan
///

#[derive(Debug)]
pub struct BindingPlan<T> {
    target: &'static str,
    bindings: Vec<FieldBinding<T>>,
    columns: ColumnSet,
    trim_text: bool,
}

impl<T> BindingPlan<T> {
    /// Compile `model` against the captured `columns`.
    pub fn build(
        model: RowModel<T>,
        columns: ColumnSet,
        options: &MapOptions,
    ) -> Result<Self, ConfigurationError> {
        let target = model.name();
        let mut seen_fields = HashSet::new();
        let mut seen_columns: HashMap<&'static str, &'static str> = HashMap::new();
        let mut bindings = Vec::with_capacity(model.fields().len());

        for field in model.into_fields() {
            if !seen_fields.insert(field.name) {
                return Err(ConfigurationError::DuplicateField {
                    target,
                    field: field.name,
                });
            }

            if field.order < UNSET_ORDER {
                return Err(ConfigurationError::InvalidOrder {
                    target,
                    field: field.name,
                    order: field.order,
                });
            }

            // only exact spellings collide; case variants share one column
            if !field.column.is_empty()
                && let Some(first) = seen_columns.insert(field.column, field.name)
            {
                return Err(ConfigurationError::DuplicateColumn {
                    target,
                    column: field.column.to_string(),
                    first,
                    second: field.name,
                });
            }

            // empty names never bind by name
            let key = columns.key(field.column);
            let source_name = if key.is_empty() {
                None
            } else {
                columns.lookup(field.column).map(str::to_string)
            };

            let ordinal = if options.ordinal_overrides {
                field.order_override()
            } else {
                None
            };

            bindings.push(FieldBinding {
                field: field.name,
                column: field.column,
                key,
                source_name,
                ordinal,
                kind: field.kind,
                nullable: field.nullable,
                set: field.set,
                set_null: field.set_null,
            });
        }

        let plan = Self {
            target,
            bindings,
            columns,
            trim_text: options.trim_text,
        };

        debug!(
            target = plan.target,
            fields = plan.bindings.len(),
            columns = plan.columns.len(),
            by_name = plan.name_bound_count(),
            by_ordinal = plan.ordinal_count(),
            "binding plan built"
        );
        record(MetricsEvent::PlanBuilt {
            target: plan.target,
            fields: plan.bindings.len() as u64,
            name_bound: plan.name_bound_count() as u64,
            ordinal_bound: plan.ordinal_count() as u64,
        });

        Ok(plan)
    }

    #[must_use]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    /// One binding per target field, in declaration order.
    #[must_use]
    pub fn bindings(&self) -> &[FieldBinding<T>] {
        &self.bindings
    }

    #[must_use]
    pub fn binding(&self, field: &str) -> Option<&FieldBinding<T>> {
        self.bindings.iter().find(|b| b.field == field)
    }

    #[must_use]
    pub const fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    #[must_use]
    pub const fn trims_text(&self) -> bool {
        self.trim_text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Fields whose resolved name is present in the column set.
    #[must_use]
    pub fn name_bound_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.is_name_bound()).count()
    }

    /// Fields carrying an ordinal override.
    #[must_use]
    pub fn ordinal_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.ordinal.is_some()).count()
    }
}
