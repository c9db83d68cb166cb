use convert_case::{Case, Casing};
use darling::{Error as DarlingError, FromMeta};

///
/// RenameRule
///
/// Container-wide rule turning a field identifier into its column name.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    UpperSnake,
    Kebab,
    Flat,
    UpperFlat,
}

impl RenameRule {
    const ACCEPTED: &'static str = "lowercase, UPPERCASE, PascalCase, camelCase, snake_case, \
                                    SCREAMING_SNAKE_CASE, kebab-case, flatcase, UPPERFLATCASE";

    pub fn apply(self, field: &str) -> String {
        match self {
            // no word splitting: `created_at` -> `created_at`, not `created at`
            Self::Lower => field.to_lowercase(),
            Self::Upper => field.to_uppercase(),
            Self::Pascal => field.to_case(Case::Pascal),
            Self::Camel => field.to_case(Case::Camel),
            Self::Snake => field.to_case(Case::Snake),
            Self::UpperSnake => field.to_case(Case::UpperSnake),
            Self::Kebab => field.to_case(Case::Kebab),
            Self::Flat => field.to_case(Case::Flat),
            Self::UpperFlat => field.to_case(Case::UpperFlat),
        }
    }
}

impl FromMeta for RenameRule {
    fn from_string(value: &str) -> Result<Self, DarlingError> {
        let rule = match value {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::UpperSnake,
            "kebab-case" => Self::Kebab,
            "flatcase" => Self::Flat,
            "UPPERFLATCASE" => Self::UpperFlat,
            other => {
                return Err(DarlingError::custom(format!(
                    "unknown rename rule '{other}', expected one of: {}",
                    Self::ACCEPTED
                )));
            }
        };

        Ok(rule)
    }
}

///
/// TESTS
///
