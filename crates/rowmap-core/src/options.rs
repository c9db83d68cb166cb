//! Mapper configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// OptionsError
///

#[derive(Debug, ThisError)]
pub enum OptionsError {
    #[error("invalid mapper options: {0}")]
    Toml(#[from] toml::de::Error),
}

///
/// MapOptions
///
/// Knobs applied to every mapping call of a `Mapper`. Missing keys take
/// their defaults when loaded from TOML.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapOptions {
    /// Trim surrounding whitespace from text before parsing it into a
    /// non-text field.
    pub trim_text: bool,

    /// Honour per-field ordinal overrides. When off, every field binds by
    /// name.
    pub ordinal_overrides: bool,

    /// Match column names case-insensitively.
    pub case_insensitive: bool,
}

impl MapOptions {
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(s)?)
    }

    #[must_use]
    pub const fn with_trim_text(mut self, trim_text: bool) -> Self {
        self.trim_text = trim_text;
        self
    }

    #[must_use]
    pub const fn with_ordinal_overrides(mut self, ordinal_overrides: bool) -> Self {
        self.ordinal_overrides = ordinal_overrides;
        self
    }

    #[must_use]
    pub const fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            trim_text: true,
            ordinal_overrides: true,
            case_insensitive: true,
        }
    }
}

///
/// TESTS
///
