//! Medal Analytics Pipeline Tests
//!
//! End-to-end behavior of the fixed analytics queries over small fixtures:
//! - Medal counts per committee/year, with season and medal filters
//! - The composite-key join chain attaching countries and statistics
//! - Efficiency ratio math and its exclusion rules
//! - The leaderboard, all-time and per-year

use std::fs;

use flatdb::analytics::{
    country_medals_with_stats, medal_leaderboard, medals_efficiency_for_year,
    medals_per_country_year, AnalyticsConfig, RatioKind,
};
use flatdb::{Scalar, Table};
use tempfile::TempDir;

// =============================================================================
// Fixtures
// =============================================================================

const EVENTS: &str = "Name,NOC,Year,Season,Medal\n\
A,USA,2000,Summer,Gold\n\
B,USA,2000,Summer,Silver\n\
C,GBR,2000,Summer,Gold\n\
D,USA,2000,Summer,NA\n\
E,USA,2002,Winter,Gold\n\
F,FRA,2000,Summer,Bronze\n";

const COUNTRIES: &str = "NOC,Country Code,Country Name\n\
USA,US,United States\n\
GBR,GB,United Kingdom\n\
FRA,FR,France\n";

// FR has population 0 and must be excluded from efficiency rankings.
const STATS: &str = "Country Code,Year,Population,GDP_USD\n\
US,2000,282000000,10000000000000\n\
GB,2000,59000000,1500000000000\n\
FR,2000,0,1300000000000\n";

fn fixture_config(tmp: &TempDir) -> AnalyticsConfig {
    let events = tmp.path().join("events.csv");
    let countries = tmp.path().join("countries.csv");
    let stats = tmp.path().join("stats.csv");
    fs::write(&events, EVENTS).unwrap();
    fs::write(&countries, COUNTRIES).unwrap();
    fs::write(&stats, STATS).unwrap();
    AnalyticsConfig::new(events, countries, stats).with_chunk_size(2)
}

/// The medal_count cell for a (NOC, Year) pair, if that group exists.
fn count_for(table: &Table, noc: &str, year: i64) -> Option<i64> {
    for row in table.iter_rows() {
        if row.get("NOC") == Some(&Scalar::Text(noc.into()))
            && row.get("Year").and_then(Scalar::as_i64) == Some(year)
        {
            return row.get("medal_count").and_then(Scalar::as_i64);
        }
    }
    None
}

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Medal Count Tests
// =============================================================================

/// Null medal cells never count; everything else groups per (NOC, Year).
#[test]
fn test_medal_counts_skip_null_medals() {
    let tmp = TempDir::new().unwrap();
    let config = fixture_config(&tmp);

    let counts =
        medals_per_country_year(&config.events_path, config.chunk_size, None, None).unwrap();

    assert_eq!(counts.n_rows(), 4);
    // The NA medal row for USA 2000 is excluded
    assert_eq!(count_for(&counts, "USA", 2000), Some(2));
    assert_eq!(count_for(&counts, "GBR", 2000), Some(1));
    assert_eq!(count_for(&counts, "USA", 2002), Some(1));
    assert_eq!(count_for(&counts, "FRA", 2000), Some(1));
}

/// Season and medal filters narrow the count independently.
#[test]
fn test_medal_count_filters() {
    let tmp = TempDir::new().unwrap();
    let config = fixture_config(&tmp);

    let summer = medals_per_country_year(
        &config.events_path,
        config.chunk_size,
        Some("Summer"),
        None,
    )
    .unwrap();
    assert_eq!(count_for(&summer, "USA", 2002), None);
    assert_eq!(count_for(&summer, "USA", 2000), Some(2));

    let gold = medals_per_country_year(
        &config.events_path,
        config.chunk_size,
        None,
        Some("Gold"),
    )
    .unwrap();
    assert_eq!(count_for(&gold, "USA", 2000), Some(1));
    assert_eq!(count_for(&gold, "GBR", 2000), Some(1));
    assert_eq!(count_for(&gold, "FRA", 2000), None);
}

// =============================================================================
// Join Chain Tests
// =============================================================================

/// Countries and statistics attach through the CC_Year composite key; a
/// committee-year with no statistics row keeps null statistics columns.
#[test]
fn test_composite_key_join_chain() {
    let tmp = TempDir::new().unwrap();
    let config = fixture_config(&tmp);

    let joined = country_medals_with_stats(&config, None, None).unwrap();
    assert_eq!(joined.n_rows(), 4);

    for row in joined.iter_rows() {
        match row.get("CC_Year") {
            Some(Scalar::Text(key)) if key == "US_2000" => {
                assert_eq!(row.get("medal_count"), Some(&Scalar::Int(2)));
                assert_eq!(
                    row.get("Country Name"),
                    Some(&Scalar::Text("United States".into()))
                );
                assert_eq!(
                    row.get("Population").and_then(Scalar::as_f64),
                    Some(282_000_000.0)
                );
            }
            Some(Scalar::Text(key)) if key == "US_2002" => {
                // No 2002 statistics row in the fixture
                assert_eq!(row.get("Population"), Some(&Scalar::Null));
                assert_eq!(row.get("GDP_USD"), Some(&Scalar::Null));
            }
            _ => {}
        }
    }
}

// =============================================================================
// Efficiency Tests
// =============================================================================

/// Exact ratio math, descending rank order, and the positive-statistics
/// exclusion rule in one pass: FR (population 0) never appears.
#[test]
fn test_efficiency_ratios_and_exclusions() {
    let tmp = TempDir::new().unwrap();
    let config = fixture_config(&tmp);

    let ranked = medals_efficiency_for_year(
        &config,
        2000,
        None,
        None,
        RatioKind::MedalsPerMillion,
    )
    .unwrap();

    // FRA excluded by population 0; USA 2002 excluded by year
    assert_eq!(ranked.n_rows(), 2);

    // GBR: 1 / (59e6 / 1e6) beats USA: 2 / (282e6 / 1e6)
    let top = ranked.row(0);
    assert_eq!(top.get("NOC"), Some(&Scalar::Text("GBR".into())));
    approx(
        top.get("medals_per_million").and_then(Scalar::as_f64).unwrap(),
        1.0 / 59.0,
    );
    approx(
        top.get("medals_per_billion_gdp").and_then(Scalar::as_f64).unwrap(),
        1.0 / 1500.0,
    );

    let second = ranked.row(1);
    assert_eq!(second.get("NOC"), Some(&Scalar::Text("USA".into())));
    approx(
        second.get("medals_per_million").and_then(Scalar::as_f64).unwrap(),
        2.0 / 282.0,
    );
}

/// Ranking by GDP ratio reorders accordingly.
#[test]
fn test_efficiency_rank_by_gdp() {
    let tmp = TempDir::new().unwrap();
    let config = fixture_config(&tmp);

    let ranked = medals_efficiency_for_year(
        &config,
        2000,
        None,
        None,
        RatioKind::MedalsPerBillionGdp,
    )
    .unwrap();

    // GBR: 1/1500 > USA: 2/10000
    assert_eq!(ranked.row(0).get("NOC"), Some(&Scalar::Text("GBR".into())));
    assert_eq!(ranked.row(1).get("NOC"), Some(&Scalar::Text("USA".into())));
}

// =============================================================================
// Leaderboard Tests
// =============================================================================

/// All-time leaderboard folds every year together and truncates to top_n.
#[test]
fn test_leaderboard_all_time() {
    let tmp = TempDir::new().unwrap();
    let config = fixture_config(&tmp);

    let board = medal_leaderboard(
        &config.events_path,
        &config.countries_path,
        config.chunk_size,
        None,
        2,
    )
    .unwrap();

    assert_eq!(board.n_rows(), 2);
    let top = board.row(0);
    assert_eq!(top.get("NOC"), Some(&Scalar::Text("USA".into())));
    assert_eq!(top.get("count_Medal"), Some(&Scalar::Int(3)));
    assert_eq!(
        top.get("Country Name"),
        Some(&Scalar::Text("United States".into()))
    );
}

/// A per-year leaderboard only counts that year's medals.
#[test]
fn test_leaderboard_for_year() {
    let tmp = TempDir::new().unwrap();
    let config = fixture_config(&tmp);

    let board = medal_leaderboard(
        &config.events_path,
        &config.countries_path,
        config.chunk_size,
        Some(2000),
        10,
    )
    .unwrap();

    assert_eq!(board.n_rows(), 3);
    let top = board.row(0);
    assert_eq!(top.get("NOC"), Some(&Scalar::Text("USA".into())));
    assert_eq!(top.get("medal_count"), Some(&Scalar::Int(2)));
}
