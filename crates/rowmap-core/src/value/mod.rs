mod coercion;
mod kind;


use crate::types::{Date, Timestamp};
use serde::Serialize;
use std::fmt;

// re-exports
pub use coercion::{CoercionError, coerce};
pub use kind::ValueKind;

///
/// Value
///
/// Tagged scalar read from a cursor cell.
///
/// Null → the cell is SQL NULL; fields receive their null/default form and
/// no coercion is attempted.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Date(Date),
    Float32(f32),
    Float64(f64),
    Int(i64),
    Null,
    Text(String),
    Timestamp(Timestamp),
    Uint(u64),
}

impl Value {
    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Float32(_) | Self::Float64(_) | Self::Int(_) | Self::Uint(_)
        )
    }

    /// Kind of the carried scalar; `None` for `Null`.
    ///
    /// Integer carriers report their full width (`Int64` / `Uint64`).
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        let kind = match self {
            Self::Blob(_) => ValueKind::Blob,
            Self::Bool(_) => ValueKind::Bool,
            Self::Date(_) => ValueKind::Date,
            Self::Float32(_) => ValueKind::Float32,
            Self::Float64(_) => ValueKind::Float64,
            Self::Int(_) => ValueKind::Int64,
            Self::Null => return None,
            Self::Text(_) => ValueKind::Text,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Uint(_) => ValueKind::Uint64,
        };

        Some(kind)
    }

    /// Label used in diagnostics, including `null`.
    #[must_use]
    pub fn kind_label(&self) -> String {
        self.kind()
            .map_or_else(|| "null".to_string(), |kind| kind.to_string())
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        if let Self::Int(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    /// Trim surrounding whitespace of a `Text` value in place.
    pub(crate) fn trim_text(&mut self) {
        if let Self::Text(s) = self {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob(b) => write!(f, "<{} bytes>", b.len()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Null => f.write_str("null"),
            Self::Text(s) => f.write_str(s),
            Self::Timestamp(t) => write!(f, "{t}"),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

#[macro_export]
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    Date      => Date,
    bool      => Bool,
    f32       => Float32,
    f64       => Float64,
    i8        => Int,
    i16       => Int,
    i32       => Int,
    i64       => Int,
    &str      => Text,
    String    => Text,
    Timestamp => Timestamp,
    u8        => Uint,
    u16       => Uint,
    u32       => Uint,
    u64       => Uint,
    Vec<u8>   => Blob,
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}
