//! CSV reader error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = Result<T, CsvError>;

/// Errors raised while opening or reading a delimited file.
///
/// Per-cell conversion failures are deliberately absent: a cell that fails
/// its column's locked parser becomes null and the read continues.
#[derive(Debug, Error)]
pub enum CsvError {
    /// File has no header line
    #[error("empty source: {0} has no header line")]
    EmptySource(PathBuf),

    /// Underlying file I/O failure
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CsvError {
    /// Wraps an I/O error with the file it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CsvError::Io {
            path: path.into(),
            source,
        }
    }
}
