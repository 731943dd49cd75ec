//! CLI argument definitions using clap
//!
//! Commands:
//! - flatdb preview --file <csv> [--limit N] [--delimiter C]
//! - flatdb group-by --file <csv> --keys a,b --agg col:kind [--chunk-size N]
//! - flatdb leaderboard --events <csv> --countries <csv> [--year Y] [--top N]
//! - flatdb efficiency --events <csv> --countries <csv> --stats <csv>
//!     --year Y [--season S] [--medal M] [--rank-by ratio] [--top N]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analytics::RatioKind;
use crate::csv::DEFAULT_CHUNK_SIZE;

/// flatdb - analytical queries over large delimited text files
#[derive(Parser, Debug)]
#[command(name = "flatdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the first rows of a delimited file as JSON records
    Preview {
        /// Path to the delimited file
        #[arg(long)]
        file: PathBuf,

        /// Maximum rows to print
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// Field delimiter
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },

    /// Streaming group-by over a delimited file
    GroupBy {
        /// Path to the delimited file
        #[arg(long)]
        file: PathBuf,

        /// Comma-separated grouping columns
        #[arg(long, value_delimiter = ',', required = true)]
        keys: Vec<String>,

        /// Aggregations as column:kind (kind: sum|avg|min|max|count|count_col)
        #[arg(long, required = true)]
        agg: Vec<String>,

        /// Rows per streamed chunk
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },

    /// Country medal leaderboard, all-time or for one year
    Leaderboard {
        /// Path to the events file
        #[arg(long)]
        events: PathBuf,

        /// Path to the country lookup file
        #[arg(long)]
        countries: PathBuf,

        /// Restrict to one Olympic year
        #[arg(long)]
        year: Option<i64>,

        /// Number of countries to show
        #[arg(long, default_value_t = 20)]
        top: usize,

        /// Rows per streamed chunk
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },

    /// Medal efficiency ratios against population and GDP for one year
    Efficiency {
        /// Path to the events file
        #[arg(long)]
        events: PathBuf,

        /// Path to the country lookup file
        #[arg(long)]
        countries: PathBuf,

        /// Path to the per-country-year statistics file
        #[arg(long)]
        stats: PathBuf,

        /// Olympic year
        #[arg(long)]
        year: i64,

        /// Restrict to one season (e.g. Summer)
        #[arg(long)]
        season: Option<String>,

        /// Restrict to one medal type (e.g. Gold)
        #[arg(long)]
        medal: Option<String>,

        /// Ratio column to rank by
        #[arg(long, value_enum, default_value_t = RankBy::MedalsPerMillion)]
        rank_by: RankBy,

        /// Number of rows to show
        #[arg(long, default_value_t = 20)]
        top: usize,

        /// Rows per streamed chunk
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
}

/// CLI spelling of the efficiency ranking column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankBy {
    MedalsPerMillion,
    MedalsPerBillionGdp,
}

impl From<RankBy> for RatioKind {
    fn from(value: RankBy) -> RatioKind {
        match value {
            RankBy::MedalsPerMillion => RatioKind::MedalsPerMillion,
            RankBy::MedalsPerBillionGdp => RatioKind::MedalsPerBillionGdp,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
