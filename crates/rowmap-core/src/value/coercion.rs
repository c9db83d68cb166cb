//! Best-effort conversion of a cursor value into a field's declared kind.
//!
//! `coerce` always returns the canonical carrier of the target kind:
//! signed integers come back as `Value::Int`, unsigned as `Value::Uint`,
//! every other kind as its own variant. Narrow integer kinds are
//! range-checked here so extraction never truncates.

use crate::{
    types::{Date, Timestamp},
    value::{Value, ValueKind},
};
use num_traits::ToPrimitive;
use thiserror::Error as ThisError;

///
/// CoercionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CoercionError {
    #[error("cannot convert {from} to {to}")]
    Unsupported { from: ValueKind, to: ValueKind },

    #[error("{from} value {value} is out of range for {to}")]
    OutOfRange {
        from: ValueKind,
        to: ValueKind,
        value: String,
    },

    #[error("cannot parse '{text}' as {to}: {reason}")]
    Parse {
        text: String,
        to: ValueKind,
        reason: String,
    },

    #[error("null cannot be converted to {to}")]
    Null { to: ValueKind },
}

impl CoercionError {
    fn unsupported(value: &Value, to: ValueKind) -> Self {
        match value.kind() {
            Some(from) => Self::Unsupported { from, to },
            None => Self::Null { to },
        }
    }

    fn out_of_range(value: &Value, to: ValueKind) -> Self {
        match value.kind() {
            Some(from) => Self::OutOfRange {
                from,
                to,
                value: value.to_string(),
            },
            None => Self::Null { to },
        }
    }

    fn parse(text: &str, to: ValueKind, reason: impl ToString) -> Self {
        Self::Parse {
            text: text.to_string(),
            to,
            reason: reason.to_string(),
        }
    }
}

/// Convert `value` into the canonical carrier of `to`.
///
/// Values already of the target kind pass through untouched.
pub fn coerce(value: Value, to: ValueKind) -> Result<Value, CoercionError> {
    if value.is_null() {
        return Err(CoercionError::Null { to });
    }

    match to {
        ValueKind::Blob => to_blob(value),
        ValueKind::Bool => to_bool(&value).map(Value::Bool),
        ValueKind::Date => to_date(&value).map(Value::Date),
        ValueKind::Float32 => to_f32(&value).map(Value::Float32),
        ValueKind::Float64 => to_f64(&value).map(Value::Float64),
        ValueKind::Int8 | ValueKind::Int16 | ValueKind::Int32 | ValueKind::Int64 => {
            to_signed(&value, to).map(Value::Int)
        }
        ValueKind::Text => to_text(value).map(Value::Text),
        ValueKind::Timestamp => to_timestamp(&value).map(Value::Timestamp),
        ValueKind::Uint8 | ValueKind::Uint16 | ValueKind::Uint32 | ValueKind::Uint64 => {
            to_unsigned(&value, to).map(Value::Uint)
        }
    }
}

fn to_blob(value: Value) -> Result<Value, CoercionError> {
    match value {
        Value::Blob(_) => Ok(value),
        other => Err(CoercionError::unsupported(&other, ValueKind::Blob)),
    }
}

fn to_bool(value: &Value) -> Result<bool, CoercionError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Int(n) => Ok(*n != 0),
        Value::Uint(n) => Ok(*n != 0),
        Value::Float32(f) => Ok(*f != 0.0),
        Value::Float64(f) => Ok(*f != 0.0),
        Value::Text(s) => {
            if s.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if s.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(CoercionError::parse(
                    s,
                    ValueKind::Bool,
                    "expected 'true' or 'false'",
                ))
            }
        }
        other => Err(CoercionError::unsupported(other, ValueKind::Bool)),
    }
}

// Floats round half-to-even before narrowing.
fn round_float(f: f64) -> f64 {
    f.round_ties_even()
}

fn to_signed(value: &Value, to: ValueKind) -> Result<i64, CoercionError> {
    let (min, max) = to
        .signed_bounds()
        .ok_or_else(|| CoercionError::unsupported(value, to))?;

    let wide: Option<i64> = match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Int(n) => Some(*n),
        Value::Uint(n) => n.to_i64(),
        Value::Float32(f) => round_float(f64::from(*f)).to_i64(),
        Value::Float64(f) => round_float(*f).to_i64(),
        Value::Text(s) => Some(s.parse::<i64>().map_err(|e| CoercionError::parse(s, to, e))?),
        other => return Err(CoercionError::unsupported(other, to)),
    };

    wide.filter(|n| (min..=max).contains(n))
        .ok_or_else(|| CoercionError::out_of_range(value, to))
}

fn to_unsigned(value: &Value, to: ValueKind) -> Result<u64, CoercionError> {
    let max = to
        .unsigned_max()
        .ok_or_else(|| CoercionError::unsupported(value, to))?;

    let wide: Option<u64> = match value {
        Value::Bool(b) => Some(u64::from(*b)),
        Value::Int(n) => n.to_u64(),
        Value::Uint(n) => Some(*n),
        Value::Float32(f) => round_float(f64::from(*f)).to_u64(),
        Value::Float64(f) => round_float(*f).to_u64(),
        Value::Text(s) => Some(s.parse::<u64>().map_err(|e| CoercionError::parse(s, to, e))?),
        other => return Err(CoercionError::unsupported(other, to)),
    };

    wide.filter(|n| *n <= max)
        .ok_or_else(|| CoercionError::out_of_range(value, to))
}

#[expect(clippy::cast_precision_loss)]
fn to_f64(value: &Value) -> Result<f64, CoercionError> {
    match value {
        Value::Bool(b) => Ok(f64::from(u8::from(*b))),
        Value::Int(n) => Ok(*n as f64),
        Value::Uint(n) => Ok(*n as f64),
        Value::Float32(f) => Ok(f64::from(*f)),
        Value::Float64(f) => Ok(*f),
        Value::Text(s) => s
            .parse::<f64>()
            .map_err(|e| CoercionError::parse(s, ValueKind::Float64, e)),
        other => Err(CoercionError::unsupported(other, ValueKind::Float64)),
    }
}

#[expect(clippy::cast_possible_truncation)]
fn to_f32(value: &Value) -> Result<f32, CoercionError> {
    let wide = match value {
        Value::Float32(f) => return Ok(*f),
        Value::Text(s) => {
            return s
                .parse::<f32>()
                .map_err(|e| CoercionError::parse(s, ValueKind::Float32, e));
        }
        other => to_f64(other).map_err(|_| CoercionError::unsupported(other, ValueKind::Float32))?,
    };

    if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
        return Err(CoercionError::out_of_range(value, ValueKind::Float32));
    }

    Ok(wide as f32)
}

fn to_text(value: Value) -> Result<String, CoercionError> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Blob(_) | Value::Null => Err(CoercionError::unsupported(&value, ValueKind::Text)),
        other => Ok(other.to_string()),
    }
}

fn to_date(value: &Value) -> Result<Date, CoercionError> {
    match value {
        Value::Date(d) => Ok(*d),
        Value::Timestamp(t) => t
            .date()
            .ok_or_else(|| CoercionError::out_of_range(value, ValueKind::Date)),
        Value::Text(s) => Date::parse(s)
            .or_else(|_| {
                Timestamp::parse_flexible(s)?
                    .date()
                    .ok_or_else(|| "date out of range".to_string())
            })
            .map_err(|e| CoercionError::parse(s, ValueKind::Date, e)),
        other => Err(CoercionError::unsupported(other, ValueKind::Date)),
    }
}

fn to_timestamp(value: &Value) -> Result<Timestamp, CoercionError> {
    match value {
        Value::Timestamp(t) => Ok(*t),
        Value::Date(d) => Ok(Timestamp::from_date(*d)),
        Value::Text(s) => Timestamp::parse_flexible(s)
            .map_err(|e| CoercionError::parse(s, ValueKind::Timestamp, e)),
        other => Err(CoercionError::unsupported(other, ValueKind::Timestamp)),
    }
}
