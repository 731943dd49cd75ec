//! CLI error types

use thiserror::Error;

use crate::analytics::AnalyticsError;
use crate::csv::CsvError;
use crate::stream::StreamError;
use crate::table::TableError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the terminal user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Malformed --agg value
    #[error("invalid aggregation spec '{0}', expected column:kind")]
    InvalidAggSpec(String),

    /// Output serialization failure
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
