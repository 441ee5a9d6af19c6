//! The table dump produced by the document extraction step.
//!
//! Extraction itself happens outside this crate. Its output is a list of
//! tables, each a list of rows, each a list of cells (text or `null`), stored
//! as JSON or YAML.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::Error;

/// One table row. Missing cells are `None`.
pub type Row = Vec<Option<String>>;

/// A single extracted table. The first row is the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table from its rows, header first.
    #[must_use]
    pub const fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// The header row, if the table has any rows.
    #[must_use]
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Every row after the header.
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().skip(1)
    }

    /// The text of the cell at `column`, or `None` when the cell is missing or
    /// the row is too short.
    #[must_use]
    pub fn cell(row: &Row, column: usize) -> Option<&str> {
        row.get(column).and_then(Option::as_deref)
    }

    /// Index of the first header cell containing `label`, ignoring case and
    /// surrounding whitespace.
    ///
    /// Variants such as `"Requirements and Testing Procedures (cont.)"` still
    /// match.
    #[must_use]
    pub fn requirements_column(&self, label: &str) -> Option<usize> {
        let label = label.trim().to_lowercase();
        self.header()?.iter().position(|cell| {
            cell.as_deref()
                .is_some_and(|text| text.trim().to_lowercase().contains(&label))
        })
    }
}

/// Every table extracted from a source document, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableDump {
    tables: Vec<Table>,
}

impl TableDump {
    /// Creates a dump from tables in document order.
    #[must_use]
    pub const fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Loads a table dump from disk.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML; anything else as
    /// JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if the file cannot be read, or
    /// [`Error::SourceMalformed`] if its content is not a table dump.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let parsed = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        let dump: Self = parsed.map_err(|reason| Error::SourceMalformed {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!(tables = dump.tables.len(), "loaded table dump");
        Ok(dump)
    }

    /// The tables, in document order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }
}
