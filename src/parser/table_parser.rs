//! Pipe table recognition and parsing.

use regex::Regex;

use super::{InlineParser, ParseContext};
use crate::error::Result;
use crate::model::{Table, TableCell, TableRow};

/// Parses contiguous `|`-prefixed lines into a [`Table`].
#[derive(Debug, Clone)]
pub struct TableParser {
    separator_regex: Regex,
}

impl TableParser {
    /// Create a new table parser.
    pub fn new() -> Result<Self> {
        Ok(Self {
            separator_regex: Regex::new(r"^\|\s*:?-+:?\s*\|")?,
        })
    }

    /// Check if a line is a header separator row (`| --- | ...`).
    pub fn is_separator(&self, line: &str) -> bool {
        self.separator_regex.is_match(line)
    }

    /// Check if `line` starts a table given the line that follows it.
    pub fn starts_table(&self, line: &str, next: Option<&str>) -> bool {
        line.starts_with('|') && next.is_some_and(|n| self.is_separator(n))
    }

    /// Parse raw table lines; the first non-separator line is the header.
    pub fn parse(&self, lines: &[&str], inline: &InlineParser, ctx: &mut ParseContext) -> Table {
        let mut content_lines = lines.iter().copied().filter(|l| !self.is_separator(l));

        let headers = content_lines.next().map(split_cells).unwrap_or_default();
        let mut table = Table::new(headers);

        for line in content_lines {
            let cells = split_cells(line)
                .into_iter()
                .map(|cell| TableCell::from_runs(inline.parse(&cell, ctx)))
                .collect();
            table.add_row(TableRow::new(cells));
        }

        log::debug!(
            "Parsed table with {} columns and {} rows",
            table.column_count(),
            table.row_count()
        );
        table
    }
}

/// Split a row on `|`, dropping the empty outer segments, and trim each cell.
pub fn split_cells(line: &str) -> Vec<String> {
    let mut segments: Vec<&str> = line.split('|').collect();
    if segments.first().is_some_and(|s| s.trim().is_empty()) {
        segments.remove(0);
    }
    if segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }
    segments.into_iter().map(|s| s.trim().to_string()).collect()
}
