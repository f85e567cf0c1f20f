//! Tabular candidates produced by the document-to-table collaborator
//!
//! A `RawTable` is ephemeral: one per fetched document table, dropped once the
//! source adapter has extracted its quotes.

use std::collections::HashMap;

/// One table lifted out of a fetched document.
///
/// Header labels keep their declared order and are unique: a repeated label
/// gets a `.1`, `.2`, ... suffix in declaration order. Every row holds exactly
/// one cell per header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create an empty table with the given header labels (trimmed).
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let headers = headers
            .into_iter()
            .map(|label| {
                let label = label.into().trim().to_string();
                let count = seen.entry(label.clone()).or_insert(0);
                let unique = if *count == 0 {
                    label
                } else {
                    format!("{label}.{count}")
                };
                *count += 1;
                unique
            })
            .collect();

        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Builder-style variant of [`RawTable::push_row`]
    #[must_use]
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    /// Append a row. Short rows are padded with empty cells, long rows truncated.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let width = self.headers.len();
        let mut row: Vec<String> = cells
            .into_iter()
            .take(width)
            .map(|cell| cell.into().trim().to_string())
            .collect();
        row.resize(width, String::new());
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in document order
    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> + '_ {
        self.rows.iter().map(move |cells| RawRow {
            headers: &self.headers,
            cells,
        })
    }
}

/// Borrowed view over one row, addressed by header text.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    headers: &'a [String],
    cells: &'a [String],
}

impl<'a> RawRow<'a> {
    /// Cell text under `header`, if the table declares that header.
    pub fn get(&self, header: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == header)
            .and_then(|index| self.cells.get(index))
            .map(String::as_str)
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }
}
