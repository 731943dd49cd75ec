//! Medal analytics pipelines
//!
//! Fixed domain queries composed from the engine primitives: streamed medal
//! counts per (committee, year), a join chain attaching country codes and
//! per-country-year statistics via a synthetic `CC_Year` composite key, and
//! efficiency ratios against population and GDP.

use std::path::Path;

use tracing::debug;

use crate::csv::{CsvReader, CsvResult};
use crate::row::Row;
use crate::scalar::Scalar;
use crate::stream::{group_by_csv, FilterProject};
use crate::table::{Aggregate, GroupBuilder, JoinKind, SortDirection, Table, TableError};

use super::config::AnalyticsConfig;
use super::errors::AnalyticsResult;

// Column contract of the source datasets
const COL_NOC: &str = "NOC";
const COL_YEAR: &str = "Year";
const COL_SEASON: &str = "Season";
const COL_MEDAL: &str = "Medal";
const COL_COUNTRY_CODE: &str = "Country Code";
const COL_POPULATION: &str = "Population";
const COL_GDP: &str = "GDP_USD";

/// Derived columns
pub const COL_MEDAL_COUNT: &str = "medal_count";
pub const COL_CC_YEAR: &str = "CC_Year";
pub const COL_MEDALS_PER_MILLION: &str = "medals_per_million";
pub const COL_MEDALS_PER_BILLION_GDP: &str = "medals_per_billion_gdp";

/// Which efficiency ratio a result is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioKind {
    MedalsPerMillion,
    MedalsPerBillionGdp,
}

impl RatioKind {
    /// Name of the derived column this ratio lives in.
    pub fn column(&self) -> &'static str {
        match self {
            RatioKind::MedalsPerMillion => COL_MEDALS_PER_MILLION,
            RatioKind::MedalsPerBillionGdp => COL_MEDALS_PER_BILLION_GDP,
        }
    }
}

/// Reads a whole delimited file into a table.
pub fn load_table(path: &Path) -> AnalyticsResult<Table> {
    let rows: Vec<Row> = CsvReader::new(path).rows()?.collect::<CsvResult<_>>()?;
    Ok(Table::from_rows(rows))
}

/// Streams the events file and counts medals per (committee, year).
///
/// Rows with a null medal are skipped; `season` and `medal_filter` narrow
/// the count when given. Output columns: `NOC`, `Year`, `medal_count`.
pub fn medals_per_country_year(
    events_path: &Path,
    chunk_size: usize,
    season: Option<&str>,
    medal_filter: Option<&str>,
) -> AnalyticsResult<Table> {
    let season = season.map(str::to_string);
    let medal_filter = medal_filter.map(str::to_string);

    let predicate = move |row: &Row| {
        let medal = match row.get(COL_MEDAL) {
            Some(Scalar::Text(m)) => m,
            _ => return false,
        };
        if let Some(want) = &medal_filter {
            if medal != want {
                return false;
            }
        }
        if let Some(want) = &season {
            match row.get(COL_SEASON) {
                Some(Scalar::Text(s)) if s == want => {}
                _ => return false,
            }
        }
        true
    };

    let chunks = CsvReader::new(events_path).chunks(chunk_size)?;
    let mut builder = GroupBuilder::new(
        &[COL_NOC, COL_YEAR],
        &[(COL_MEDAL, Aggregate::CountCol)],
    );
    for row in FilterProject::new(chunks, predicate) {
        builder.update(&row?)?;
    }
    let counts = builder.finish()?;

    debug!(groups = counts.n_rows(), "medal counts aggregated");
    rename_column(&counts, "count_Medal", COL_MEDAL_COUNT)
}

/// Medal counts joined with the country-code lookup and the per-country-year
/// statistics table.
///
/// The statistics join runs on the synthetic `CC_Year` composite key
/// (`"<Country Code>_<Year>"`); rows whose code or year is null are dropped
/// from both sides before the join.
pub fn country_medals_with_stats(
    config: &AnalyticsConfig,
    season: Option<&str>,
    medal_filter: Option<&str>,
) -> AnalyticsResult<Table> {
    let medals = medals_per_country_year(
        &config.events_path,
        config.chunk_size,
        season,
        medal_filter,
    )?;

    let countries = load_table(&config.countries_path)?;
    let with_codes = medals.join(&countries, COL_NOC, JoinKind::Left, "_noc")?;

    let stats = load_table(&config.stats_path)?;
    let medals_keyed = with_composite_key(&with_codes, COL_COUNTRY_CODE, COL_YEAR, COL_CC_YEAR)?;
    let stats_keyed = with_composite_key(&stats, COL_COUNTRY_CODE, COL_YEAR, COL_CC_YEAR)?;

    Ok(medals_keyed.join(&stats_keyed, COL_CC_YEAR, JoinKind::Left, "_stats")?)
}

/// Efficiency ratios for one year, ranked descending by `rank_by`.
///
/// Only rows with a strictly positive, non-null population and GDP survive;
/// for those, `medals_per_million = medal_count / (population / 1e6)` and
/// `medals_per_billion_gdp = medal_count / (gdp / 1e9)`.
pub fn medals_efficiency_for_year(
    config: &AnalyticsConfig,
    year: i64,
    season: Option<&str>,
    medal_filter: Option<&str>,
    rank_by: RatioKind,
) -> AnalyticsResult<Table> {
    let joined = country_medals_with_stats(config, season, medal_filter)?;
    let year_rows = joined.filter(|row| {
        row.get(COL_YEAR).and_then(Scalar::as_i64) == Some(year)
    });

    let mut keep = Vec::new();
    let mut per_million = Vec::new();
    let mut per_billion = Vec::new();

    for i in 0..year_rows.n_rows() {
        let row = year_rows.row(i);
        let population = row.get(COL_POPULATION).and_then(Scalar::as_f64);
        let gdp = row.get(COL_GDP).and_then(Scalar::as_f64);
        let medal_count = row.get(COL_MEDAL_COUNT).and_then(Scalar::as_f64);

        let (population, gdp, medal_count) = match (population, gdp, medal_count) {
            (Some(p), Some(g), Some(m)) if p > 0.0 && g > 0.0 => (p, g, m),
            _ => continue,
        };

        keep.push(i);
        per_million.push(Scalar::Float(medal_count / (population / 1_000_000.0)));
        per_billion.push(Scalar::Float(medal_count / (gdp / 1_000_000_000.0)));
    }

    let base = year_rows.take(&keep);
    let mut columns: Vec<(String, Vec<Scalar>)> = base
        .column_names()
        .iter()
        .map(|name| (name.clone(), base.column(name).unwrap().to_vec()))
        .collect();
    columns.push((COL_MEDALS_PER_MILLION.to_string(), per_million));
    columns.push((COL_MEDALS_PER_BILLION_GDP.to_string(), per_billion));

    let result = Table::new(columns)?;
    debug!(year, rows = result.n_rows(), "efficiency table built");
    Ok(result.order_by(&[(rank_by.column(), SortDirection::Desc)])?)
}

/// Country medal leaderboard: all-time when `year` is `None`, otherwise for
/// that year only. Joined with the country lookup, sorted descending by
/// count, truncated to `top_n`.
pub fn medal_leaderboard(
    events_path: &Path,
    countries_path: &Path,
    chunk_size: usize,
    year: Option<i64>,
    top_n: usize,
) -> AnalyticsResult<Table> {
    let countries = load_table(countries_path)?;

    let (counts, count_col) = match year {
        None => {
            let counts = group_by_csv(
                &CsvReader::new(events_path),
                chunk_size,
                &[COL_NOC],
                &[(COL_MEDAL, Aggregate::CountCol)],
            )?;
            (counts, "count_Medal")
        }
        Some(year) => {
            let per_year = medals_per_country_year(events_path, chunk_size, None, None)?;
            let counts = per_year.filter(|row| {
                row.get(COL_YEAR).and_then(Scalar::as_i64) == Some(year)
            });
            (counts, COL_MEDAL_COUNT)
        }
    };

    let joined = counts.join(&countries, COL_NOC, JoinKind::Left, "_country")?;
    let ranked = joined.order_by(&[(count_col, SortDirection::Desc)])?;
    Ok(ranked.head(top_n))
}

/// Appends a text column `"<code>_<year>"`, dropping rows where either part
/// is null. Two-way joins on this synthetic key stand in for a multi-key
/// join.
fn with_composite_key(
    table: &Table,
    code_col: &str,
    year_col: &str,
    out_col: &str,
) -> AnalyticsResult<Table> {
    let codes = table
        .column(code_col)
        .ok_or_else(|| TableError::MissingColumn(code_col.to_string()))?;
    let years = table
        .column(year_col)
        .ok_or_else(|| TableError::MissingColumn(year_col.to_string()))?;

    let mut keep = Vec::new();
    let mut keys = Vec::new();
    for i in 0..table.n_rows() {
        if codes[i].is_null() || years[i].is_null() {
            continue;
        }
        keep.push(i);
        keys.push(Scalar::Text(format!("{}_{}", codes[i], years[i])));
    }

    let base = table.take(&keep);
    let mut columns: Vec<(String, Vec<Scalar>)> = base
        .column_names()
        .iter()
        .map(|name| (name.clone(), base.column(name).unwrap().to_vec()))
        .collect();
    columns.push((out_col.to_string(), keys));
    Ok(Table::new(columns)?)
}

fn rename_column(table: &Table, from: &str, to: &str) -> AnalyticsResult<Table> {
    let columns: Vec<(String, Vec<Scalar>)> = table
        .column_names()
        .iter()
        .map(|name| {
            let new_name = if name == from { to } else { name.as_str() };
            (new_name.to_string(), table.column(name).unwrap().to_vec())
        })
        .collect();
    Ok(Table::new(columns)?)
}
