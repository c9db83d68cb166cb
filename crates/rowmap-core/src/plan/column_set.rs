use crate::cursor::{Cursor, CursorError};
use std::collections::{HashMap, HashSet};
use tracing::debug;

///
/// ColumnSet
///
/// Column names of one cursor, captured once per mapping call and folded
/// for presence checks. Each folded key remembers the cursor's own spelling
/// of the first column that produced it. Exact spellings are kept as well;
/// `lookup` prefers them.
///

#[derive(Clone, Debug, Default)]
pub struct ColumnSet {
    names: HashMap<String, String>,
    exact: HashSet<String>,
    case_insensitive: bool,
}

impl ColumnSet {
    #[must_use]
    pub fn new<I, S>(names: I, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut folded = HashMap::new();
        let mut exact = HashSet::new();
        for name in names {
            let name = name.as_ref();
            folded
                .entry(fold(name, case_insensitive))
                .or_insert_with(|| name.to_string());
            exact.insert(name.to_string());
        }

        Self {
            names: folded,
            exact,
            case_insensitive,
        }
    }

    /// Capture the cursor's columns.
    ///
    /// A cursor that refuses enumeration yields an empty set; only ordinal
    /// bindings can match against it.
    pub fn capture<C: Cursor + ?Sized>(
        cursor: &C,
        case_insensitive: bool,
    ) -> Result<Self, CursorError> {
        match cursor.column_names() {
            Ok(names) => Ok(Self::new(names, case_insensitive)),
            Err(err) if err.is_unsupported() => {
                debug!(error = %err, "column enumeration refused; binding by ordinal only");

                Ok(Self::new(Vec::<String>::new(), case_insensitive))
            }
            Err(err) => Err(err),
        }
    }

    /// Fold `name` the way this set stores its members.
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        fold(name, self.case_insensitive)
    }

    /// Presence check for an already folded key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.names.contains_key(key)
    }

    /// Cursor spelling of the column behind a folded key.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Cursor spelling for `name`: the exact column when the cursor has
    /// one, else the first column folding to the same key.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&str> {
        match self.exact.get(name) {
            Some(exact) => Some(exact.as_str()),
            None => self.resolve(&self.key(name)),
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.contains_key(&self.key(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub const fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

fn fold(name: &str, case_insensitive: bool) -> String {
    if !case_insensitive {
        return name.to_string();
    }

    if name.is_ascii() {
        name.to_ascii_lowercase()
    } else {
        name.to_lowercase()
    }
}
