use crate::types::Date;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    str::FromStr,
};

const MILLIS_PER_DAY: i64 = 86_400_000;

// accepted layouts for zone-less text, tried in order
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

///
/// Timestamp
/// (in milliseconds since the Unix epoch, UTC)
///

#[derive(
    Clone, Copy, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[repr(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    #[must_use]
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// Midnight UTC at the start of `date`.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self(i64::from(date.get()) * MILLIS_PER_DAY)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Calendar date (UTC) this instant falls on; `None` past the
    /// calendar range.
    #[must_use]
    pub fn date(self) -> Option<Date> {
        Date::from_days(self.0.div_euclid(MILLIS_PER_DAY))
    }

    pub fn parse_rfc3339(s: &str) -> Result<Self, String> {
        let dt =
            DateTime::parse_from_rfc3339(s).map_err(|e| format!("timestamp parse error: {e}"))?;

        Ok(Self(dt.timestamp_millis()))
    }

    /// Parse RFC 3339, zone-less `YYYY-MM-DD HH:MM:SS[.f]` (read as UTC),
    /// or a bare `YYYY-MM-DD` (midnight UTC).
    pub fn parse_flexible(s: &str) -> Result<Self, String> {
        if let Ok(ts) = Self::parse_rfc3339(s) {
            return Ok(ts);
        }

        for layout in NAIVE_LAYOUTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
                return Ok(Self(naive.and_utc().timestamp_millis()));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc().timestamp_millis()))
            .ok_or_else(|| format!("timestamp parse error: unrecognised layout '{s}'"))
    }

    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({self})")
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_flexible(s)
    }
}

impl From<Date> for Timestamp {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

///
/// TESTS
///
