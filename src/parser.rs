//! End-to-end extraction: tables → blobs → control tree.

use tracing::{debug, info, instrument, warn};

use crate::{
    domain::{Blob, BlobAssembler, BuildReport, Config, ControlTree},
    storage::Table,
    Error,
};

/// A control tree together with the diagnostics gathered while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// The reconstructed tree.
    pub tree: ControlTree,
    /// Skipped blobs and duplicate identifiers.
    pub report: BuildReport,
}

/// Reassembles requirement blobs from every table that has the requirements
/// column.
///
/// Tables are processed in order and their rows in order; tables without the
/// column are skipped.
#[must_use]
#[instrument(level = "debug", skip_all, fields(tables = tables.len()))]
pub fn extract_blobs(tables: &[Table], config: &Config) -> Vec<Blob> {
    let mut assembler = BlobAssembler::new(config.ignored_headers().iter().cloned());

    for (index, table) in tables.iter().enumerate() {
        let Some(column) = table.requirements_column(config.requirements_column()) else {
            debug!(table = index, "no requirements column, skipping table");
            continue;
        };
        assembler.push_table(table, column);
    }

    if assembler.orphaned() > 0 {
        debug!(
            cells = assembler.orphaned(),
            "discarded text found before the first requirement"
        );
    }

    assembler.finish()
}

/// Builds the control tree for a set of extracted tables.
///
/// # Errors
///
/// Returns [`Error::NoTablesFound`] if `tables` is empty, or
/// [`Error::NoContentExtracted`] if no blobs could be assembled.
#[instrument(level = "debug", skip_all, fields(tables = tables.len()))]
pub fn parse_tables(tables: &[Table], config: &Config) -> Result<Parsed, Error> {
    if tables.is_empty() {
        return Err(Error::NoTablesFound);
    }

    let blobs = extract_blobs(tables, config);
    if blobs.is_empty() {
        return Err(Error::NoContentExtracted);
    }
    info!(blobs = blobs.len(), "assembled requirement blobs");

    let (tree, report) = ControlTree::from_blobs(&blobs);

    for skipped in report.unparseable() {
        debug!(position = skipped.position, text = %skipped.text, "dropped blob without identifier");
    }
    for duplicate in report.duplicates() {
        warn!(
            identifier = %duplicate.identifier,
            occurrences = duplicate.occurrences,
            "identifier appears more than once"
        );
    }
    info!(nodes = tree.len(), "built control tree");

    Ok(Parsed { tree, report })
}
