//! Raw tabular input as handed over by an event store adapter

use std::collections::HashMap;

/// A table of string cells with a header row.
///
/// This is the boundary type between whatever fetched the data (CSV file,
/// spreadsheet export, form accumulator) and the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Name used in diagnostics (usually a file path)
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(source: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            source: source.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Builder-style row push, mostly for tests and form accumulators
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Map from normalized header name to column index (first occurrence wins)
    pub fn header_map(&self) -> HashMap<String, usize> {
        let mut map = HashMap::new();
        for (i, h) in self.headers.iter().enumerate() {
            map.entry(normalize_header(h)).or_insert(i);
        }
        map
    }
}

/// Normalize a header for matching: trimmed, lowercase, spaces and hyphens as
/// underscores, byte-order mark removed.
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace('-', "_")
}
