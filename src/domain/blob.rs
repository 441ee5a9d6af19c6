//! Reassembly of requirement blobs from a stream of table cells.
//!
//! Requirement text is split across many cells (and pages). A cell that starts
//! with an identifier token opens a new blob; anything else is continuation
//! text for the blob that is currently open.

use std::fmt;

use tracing::trace;

use super::identifier::match_identifier;
use crate::storage::Table;

/// A reassembled run of cell text believed to be one requirement entry.
///
/// Blobs are only ever opened from a non-empty cell, so the text is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob(String);

impl Blob {
    /// Returns the blob text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn extend(&mut self, text: &str) {
        self.0.push(' ');
        self.0.push_str(text);
    }
}

impl AsRef<str> for Blob {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened to a single cell fed to the [`BlobAssembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOutcome {
    /// The cell was missing or whitespace-only.
    Empty,
    /// The cell is a heading label from another column and was skipped.
    IgnoredHeader,
    /// The cell started with an identifier and opened a new blob.
    Opened,
    /// The cell was appended to the current blob.
    Extended,
    /// The cell had content but no blob was open yet, so it was dropped.
    Orphaned,
}

/// Builds blobs from cells, in order.
#[derive(Debug, Default)]
pub struct BlobAssembler {
    ignored_headers: Vec<String>,
    blobs: Vec<Blob>,
    orphaned: usize,
}

impl BlobAssembler {
    /// Creates an assembler that skips cells starting with any of the given
    /// heading labels (case-insensitive, whole words).
    pub fn new<I, S>(ignored_headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored_headers: ignored_headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Feeds one cell value.
    pub fn push_cell(&mut self, cell: Option<&str>) -> CellOutcome {
        let text = cell.map(str::trim).unwrap_or_default();

        let outcome = if text.is_empty() {
            CellOutcome::Empty
        } else if self.is_ignored_header(text) {
            CellOutcome::IgnoredHeader
        } else if match_identifier(text).is_some() {
            self.blobs.push(Blob(text.to_string()));
            CellOutcome::Opened
        } else if let Some(current) = self.blobs.last_mut() {
            current.extend(text);
            CellOutcome::Extended
        } else {
            self.orphaned += 1;
            CellOutcome::Orphaned
        };

        trace!(?outcome, "cell");
        outcome
    }

    /// Feeds every data row of `table`, reading the cell in `column`.
    ///
    /// The header row is never fed. Rows too short to reach `column` count as
    /// empty cells.
    pub fn push_table(&mut self, table: &Table, column: usize) {
        for row in table.data_rows() {
            self.push_cell(Table::cell(row, column));
        }
    }

    /// The blobs assembled so far.
    #[must_use]
    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// Number of non-empty cells dropped because no blob was open.
    #[must_use]
    pub const fn orphaned(&self) -> usize {
        self.orphaned
    }

    /// Consumes the assembler, returning the blobs in order.
    #[must_use]
    pub fn finish(self) -> Vec<Blob> {
        self.blobs
    }

    fn is_ignored_header(&self, text: &str) -> bool {
        self.ignored_headers
            .iter()
            .any(|header| starts_with_word(text, header))
    }
}

/// Case-insensitive prefix match that must end on a word boundary.
fn starts_with_word(text: &str, prefix: &str) -> bool {
    let Some(head) = text.get(..prefix.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(prefix) {
        return false;
    }
    text[prefix.len()..]
        .chars()
        .next()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
}
