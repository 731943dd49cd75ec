//! Analytics subsystem
//!
//! Domain queries over the Olympic datasets, composed entirely from the
//! csv/table/stream primitives. Every call re-reads its source files from
//! scratch; nothing is cached between calls and no state outlives a call.

mod config;
mod errors;
mod medals;

pub use config::AnalyticsConfig;
pub use errors::{AnalyticsError, AnalyticsResult};
pub use medals::{
    country_medals_with_stats, load_table, medal_leaderboard, medals_efficiency_for_year,
    medals_per_country_year, RatioKind, COL_CC_YEAR, COL_MEDALS_PER_BILLION_GDP,
    COL_MEDALS_PER_MILLION, COL_MEDAL_COUNT,
};
