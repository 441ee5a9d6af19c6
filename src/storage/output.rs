use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tracing::debug;

use crate::Error;

/// Writes `text` to `path`, or to standard output when `path` is `None`.
///
/// # Errors
///
/// Returns [`Error::OutputWriteFailure`] if the destination cannot be written.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<(), Error> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), bytes = text.len(), "writing output file");
            fs::write(path, text).map_err(|source| Error::OutputWriteFailure {
                destination: path.display().to_string(),
                source,
            })
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| Error::OutputWriteFailure {
                    destination: "<stdout>".to_string(),
                    source,
                })
        }
    }
}
