use crate::{cursor::CursorError, plan::ConfigurationError, value::CoercionError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// MapError
///
/// Everything a mapping call can fail with.
///

#[derive(Debug, ThisError)]
pub enum MapError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error("mapping cancelled")]
    Cancelled,
}

impl MapError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Configuration(_) => ErrorClass::Configuration,
            Self::Conversion(_) => ErrorClass::Conversion,
            Self::Cursor(_) => ErrorClass::Cursor,
            Self::Cancelled => ErrorClass::Cancelled,
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Conversion details, when the failure happened while assigning a field.
    #[must_use]
    pub const fn as_conversion(&self) -> Option<&ConversionError> {
        match self {
            Self::Conversion(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ConversionError
///
/// A cell could not be assigned to its field. Carries the offending field,
/// the column it was read from, and the zero-based row index within the
/// mapping call.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{target}.{field} (column '{column}', row {row}): {source}")]
pub struct ConversionError {
    pub target: &'static str,
    pub field: &'static str,
    pub column: String,
    pub row: u64,
    pub source: CoercionError,
}

///
/// ErrorClass
/// Coarse taxonomy used for logs and metrics labels.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Configuration,
    Conversion,
    Cursor,
    Cancelled,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Conversion => "conversion",
            Self::Cursor => "cursor",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
