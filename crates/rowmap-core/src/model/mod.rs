//! Declarative description of a mapping target.
//!
//! A `RowModel<T>` lists every mappable field of `T` with its column name,
//! optional ordinal override, coercion kind and compiled setters. It is
//! produced by `#[derive(FromRow)]` or assembled by hand through
//! [`RowModel::builder`].

mod field;


use std::fmt;

pub use field::{FieldModel, FieldSetter, NullSetter, UNSET_ORDER};

///
/// RowModel
///

pub struct RowModel<T> {
    name: &'static str,
    fields: Vec<FieldModel<T>>,
}

impl<T> RowModel<T> {
    #[must_use]
    pub const fn new(name: &'static str, fields: Vec<FieldModel<T>>) -> Self {
        Self { name, fields }
    }

    #[must_use]
    pub const fn builder(name: &'static str) -> RowModelBuilder<T> {
        RowModelBuilder {
            name,
            fields: Vec::new(),
        }
    }

    /// Name of the target type, used in diagnostics and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldModel<T>] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel<T>> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn into_fields(self) -> Vec<FieldModel<T>> {
        self.fields
    }
}

impl<T> Clone for RowModel<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for RowModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowModel")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

///
/// RowModelBuilder
///
/// Explicit registration API for types that do not derive `FromRow`.
///

pub struct RowModelBuilder<T> {
    name: &'static str,
    fields: Vec<FieldModel<T>>,
}

impl<T> RowModelBuilder<T> {
    #[must_use]
    pub fn field(mut self, field: FieldModel<T>) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn build(self) -> RowModel<T> {
        RowModel::new(self.name, self.fields)
    }
}
