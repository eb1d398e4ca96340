//! Table types.

use super::{Paragraph, TextRun};
use serde::{Deserialize, Serialize};

/// A table with a single header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header labels
    pub headers: Vec<String>,

    /// Data rows (never includes the header)
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a table with the given header labels and no rows.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row, padding or truncating it to the header width.
    pub fn add_row(&mut self, mut row: TableRow) {
        let width = self.column_count();
        if row.cells.len() != width {
            log::debug!(
                "Normalizing table row from {} to {} cells",
                row.cells.len(),
                width
            );
            row.cells.resize_with(width, TableCell::empty);
        }
        self.rows.push(row);
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (the header width).
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        std::iter::once(self.headers.join("\t"))
            .chain(self.rows.iter().map(|row| row.plain_text()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table data row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from plain text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell holding one paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub content: Paragraph,
}

impl TableCell {
    /// Create a cell with plain text content.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::empty();
        }
        Self {
            content: Paragraph::with_text(text),
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self {
            content: Paragraph::new(),
        }
    }

    /// Create a cell from parsed runs.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self {
            content: Paragraph::from_runs(runs),
        }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content.plain_text()
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
