//! Table error types

use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised by table construction and relational operations.
///
/// All of these are fatal for the call that raised them; there is no partial
/// result.
#[derive(Debug, Error)]
pub enum TableError {
    /// Construction invariant: every column has the same length
    #[error("all columns must have equal length")]
    UnequalColumnLength,

    /// A requested column does not exist
    #[error("unknown column: {0}")]
    MissingColumn(String),

    /// The join key is absent from one or both tables
    #[error("join key '{0}' missing from one of the tables")]
    MissingJoinKey(String),

    /// An aggregation-spec entry named an unknown aggregate kind
    #[error("unsupported aggregate: {0}")]
    UnsupportedAggregate(String),
}
