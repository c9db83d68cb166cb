//! Forward-only, read-only row source the mapper consumes.
//!
//! The mapper never owns a cursor; it borrows one for the duration of a
//! mapping call and only ever moves it forward.

mod memory;


use crate::value::Value;
use thiserror::Error as ThisError;

// re-exports
pub use memory::MemoryCursor;

///
/// CursorError
///

#[derive(Debug, ThisError)]
pub enum CursorError {
    /// The cursor does not implement `operation` (e.g. column enumeration).
    #[error("cursor does not support {operation}")]
    Unsupported { operation: &'static str },

    #[error("cursor is not positioned on a row")]
    NoCurrentRow,

    #[error("column '{name}' not found")]
    ColumnNotFound { name: String },

    #[error("column ordinal {ordinal} out of range ({count} fields)")]
    OrdinalOutOfRange { ordinal: usize, count: usize },

    /// Failure raised by the underlying driver.
    #[error(transparent)]
    Driver(Box<dyn std::error::Error + Send + Sync>),
}

impl CursorError {
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    pub fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Driver(Box::new(err))
    }
}

///
/// Cursor
///
/// Tabular result cursor positioned before its first row until the first
/// successful `advance`.
///

pub trait Cursor {
    /// Number of fields in the current row (or the result shape before the
    /// first row).
    fn field_count(&self) -> usize;

    fn column_name(&self, ordinal: usize) -> Result<&str, CursorError>;

    /// Column names by ordinal. Cursors that cannot enumerate their shape
    /// return `CursorError::Unsupported`.
    fn column_names(&self) -> Result<Vec<String>, CursorError> {
        (0..self.field_count())
            .map(|ordinal| self.column_name(ordinal).map(str::to_string))
            .collect()
    }

    /// Move to the next row; `false` once the cursor is exhausted.
    fn advance(&mut self) -> Result<bool, CursorError>;

    fn value_by_name(&self, name: &str) -> Result<Value, CursorError>;

    fn value_at(&self, ordinal: usize) -> Result<Value, CursorError>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn column_name(&self, ordinal: usize) -> Result<&str, CursorError> {
        (**self).column_name(ordinal)
    }

    fn column_names(&self) -> Result<Vec<String>, CursorError> {
        (**self).column_names()
    }

    fn advance(&mut self) -> Result<bool, CursorError> {
        (**self).advance()
    }

    fn value_by_name(&self, name: &str) -> Result<Value, CursorError> {
        (**self).value_by_name(name)
    }

    fn value_at(&self, ordinal: usize) -> Result<Value, CursorError> {
        (**self).value_at(ordinal)
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn column_name(&self, ordinal: usize) -> Result<&str, CursorError> {
        (**self).column_name(ordinal)
    }

    fn column_names(&self) -> Result<Vec<String>, CursorError> {
        (**self).column_names()
    }

    fn advance(&mut self) -> Result<bool, CursorError> {
        (**self).advance()
    }

    fn value_by_name(&self, name: &str) -> Result<Value, CursorError> {
        (**self).value_by_name(name)
    }

    fn value_at(&self, ordinal: usize) -> Result<Value, CursorError> {
        (**self).value_at(ordinal)
    }
}
