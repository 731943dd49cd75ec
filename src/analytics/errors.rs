//! Analytics pipeline error types

use thiserror::Error;

use crate::csv::CsvError;
use crate::stream::StreamError;
use crate::table::TableError;

/// Result type for analytics pipelines
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors surfaced by the fixed domain queries. Callers get either a
/// complete result table or one of these; there is no partial success.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Source file failure
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Table operation failure
    #[error(transparent)]
    Table(#[from] TableError),

    /// Streaming operator failure
    #[error(transparent)]
    Stream(#[from] StreamError),
}
