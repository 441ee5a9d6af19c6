use std::{io, path::PathBuf};

/// Fatal errors raised while turning a table dump into a control tree.
///
/// Blobs that carry no identifier are not errors; they are counted in the
/// [`BuildReport`](crate::BuildReport) instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source document could not be opened or read.
    #[error("failed to read source document {}", path.display())]
    SourceUnavailable {
        /// Path of the source document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The source document was read but is not a table dump.
    #[error("source document {} is not a valid table dump: {reason}", path.display())]
    SourceMalformed {
        /// Path of the source document.
        path: PathBuf,
        /// Parser error message.
        reason: String,
    },

    /// The source document contains no tables.
    #[error("no tables found in the source document")]
    NoTablesFound,

    /// No table had the requirements column, or the column held no
    /// requirements.
    #[error("no requirement blobs extracted; check the table structure and headers")]
    NoContentExtracted,

    /// The output destination could not be written.
    #[error("failed to write output to {destination}")]
    OutputWriteFailure {
        /// Output file path, or `<stdout>`.
        destination: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
