use crate::{
    cursor::{Cursor, CursorError},
    value::Value,
};

///
/// MemoryCursor
///
/// Cursor over rows already held in memory.
///
/// Rows may be ragged; `field_count` reports the width of the current row
/// once positioned. Name lookup prefers an exact match and falls back to a
/// case-insensitive one, the way most SQL drivers resolve column names.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: Option<usize>,
    introspection: bool,
}

impl MemoryCursor {
    #[must_use]
    pub fn new<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
            position: None,
            introspection: true,
        }
    }

    /// Refuse column enumeration, like drivers that cannot describe their
    /// result shape.
    #[must_use]
    pub fn without_introspection(mut self) -> Self {
        self.introspection = false;
        self
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Rewind to before the first row.
    pub const fn reset(&mut self) {
        self.position = None;
    }

    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn current(&self) -> Result<&[Value], CursorError> {
        self.position
            .and_then(|pos| self.rows.get(pos))
            .map(Vec::as_slice)
            .ok_or(CursorError::NoCurrentRow)
    }

    fn ordinal_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(name)))
            .or_else(|| {
                let folded = name.to_lowercase();
                self.columns.iter().position(|c| c.to_lowercase() == folded)
            })
    }
}

impl Cursor for MemoryCursor {
    fn field_count(&self) -> usize {
        self.current().map_or(self.columns.len(), <[Value]>::len)
    }

    fn column_name(&self, ordinal: usize) -> Result<&str, CursorError> {
        if !self.introspection {
            return Err(CursorError::Unsupported {
                operation: "column enumeration",
            });
        }

        self.columns
            .get(ordinal)
            .map(String::as_str)
            .ok_or(CursorError::OrdinalOutOfRange {
                ordinal,
                count: self.columns.len(),
            })
    }

    fn column_names(&self) -> Result<Vec<String>, CursorError> {
        if !self.introspection {
            return Err(CursorError::Unsupported {
                operation: "column enumeration",
            });
        }

        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> Result<bool, CursorError> {
        let next = self.position.map_or(0, |pos| pos.saturating_add(1));
        let has_row = next < self.rows.len();

        // park one past the end so later advances stay exhausted
        self.position = Some(next.min(self.rows.len()));

        Ok(has_row)
    }

    fn value_by_name(&self, name: &str) -> Result<Value, CursorError> {
        let ordinal = self
            .ordinal_of(name)
            .ok_or_else(|| CursorError::ColumnNotFound {
                name: name.to_string(),
            })?;

        self.value_at(ordinal)
    }

    fn value_at(&self, ordinal: usize) -> Result<Value, CursorError> {
        let row = self.current()?;

        row.get(ordinal)
            .cloned()
            .ok_or(CursorError::OrdinalOutOfRange {
                ordinal,
                count: row.len(),
            })
    }
}
