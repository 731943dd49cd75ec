//! Analytics dataset configuration
//!
//! Dataset locations are explicit constructor arguments, never module-level
//! defaults: every pipeline call names its sources.

use std::path::PathBuf;

use crate::csv::DEFAULT_CHUNK_SIZE;

/// Locations of the three analytics datasets plus the streaming chunk size.
///
/// - `events_path`: one row per athlete-event result (`NOC`, `Year`,
///   `Season`, `Medal`, ...)
/// - `countries_path`: national-committee code lookup (`NOC`,
///   `Country Code`, ...)
/// - `stats_path`: per-country-year statistics (`Country Code`, `Year`,
///   `Population`, `GDP_USD`)
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub events_path: PathBuf,
    pub countries_path: PathBuf,
    pub stats_path: PathBuf,
    pub chunk_size: usize,
}

impl AnalyticsConfig {
    pub fn new(
        events_path: impl Into<PathBuf>,
        countries_path: impl Into<PathBuf>,
        stats_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            events_path: events_path.into(),
            countries_path: countries_path.into(),
            stats_path: stats_path.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}
