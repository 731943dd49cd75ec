//! Streaming operator error types

use thiserror::Error;

use crate::csv::CsvError;
use crate::table::TableError;

/// Result type for streaming operations
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors raised by the chunked operators.
///
/// A failure partway through a stream aborts the whole operation; there is
/// no partial-result resumption.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Failure in the underlying row/chunk source
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Failure in a per-chunk table operation
    #[error(transparent)]
    Table(#[from] TableError),

    /// Streaming join only supports inner and left
    #[error("streaming join supports 'inner' and 'left' only, got '{0}'")]
    UnsupportedJoin(String),
}
