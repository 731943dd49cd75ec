//! CLI command dispatch
//!
//! Each command runs one engine entry point and prints the result to stdout
//! as a JSON array of records. Logs go to stderr so output stays pipeable.

use tracing_subscriber::EnvFilter;

use crate::analytics::{medal_leaderboard, medals_efficiency_for_year, AnalyticsConfig};
use crate::csv::{CsvReader, CsvResult};
use crate::row::Row;
use crate::stream::group_by_csv;
use crate::table::{Aggregate, Table};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parses arguments, runs the chosen command, prints the result.
pub fn run() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse_args().command {
        Command::Preview {
            file,
            limit,
            delimiter,
        } => {
            let reader = CsvReader::with_delimiter(file, delimiter);
            let rows: Vec<Row> = reader.rows()?.take(limit).collect::<CsvResult<_>>()?;
            print_rows(&rows)
        }

        Command::GroupBy {
            file,
            keys,
            agg,
            chunk_size,
        } => {
            let spec = parse_agg_specs(&agg)?;
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            let spec_refs: Vec<(&str, Aggregate)> =
                spec.iter().map(|(c, a)| (c.as_str(), *a)).collect();
            let table = group_by_csv(&CsvReader::new(file), chunk_size, &keys, &spec_refs)?;
            print_table(&table)
        }

        Command::Leaderboard {
            events,
            countries,
            year,
            top,
            chunk_size,
        } => {
            let table = medal_leaderboard(&events, &countries, chunk_size, year, top)?;
            print_table(&table)
        }

        Command::Efficiency {
            events,
            countries,
            stats,
            year,
            season,
            medal,
            rank_by,
            top,
            chunk_size,
        } => {
            let config =
                AnalyticsConfig::new(events, countries, stats).with_chunk_size(chunk_size);
            let table = medals_efficiency_for_year(
                &config,
                year,
                season.as_deref(),
                medal.as_deref(),
                rank_by.into(),
            )?;
            print_table(&table.head(top))
        }
    }
}

/// Parses `column:kind` pairs; the kind goes through `Aggregate::from_str`,
/// so an unknown kind reports `UnsupportedAggregate`.
fn parse_agg_specs(specs: &[String]) -> CliResult<Vec<(String, Aggregate)>> {
    specs
        .iter()
        .map(|spec| {
            let (column, kind) = spec
                .split_once(':')
                .ok_or_else(|| CliError::InvalidAggSpec(spec.clone()))?;
            Ok((column.to_string(), kind.parse::<Aggregate>()?))
        })
        .collect()
}

fn print_table(table: &Table) -> CliResult<()> {
    let rows: Vec<Row> = table.iter_rows().collect();
    print_rows(&rows)
}

fn print_rows(rows: &[Row]) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_agg_specs() {
        let specs = parse_agg_specs(&["Medal:count_col".to_string()]).unwrap();
        assert_eq!(specs[0].0, "Medal");
        assert_eq!(specs[0].1, Aggregate::CountCol);
    }

    #[test]
    fn test_parse_agg_specs_rejects_bad_shape() {
        assert!(matches!(
            parse_agg_specs(&["Medal".to_string()]),
            Err(CliError::InvalidAggSpec(_))
        ));
    }

    #[test]
    fn test_parse_agg_specs_rejects_unknown_kind() {
        assert!(matches!(
            parse_agg_specs(&["Medal:median".to_string()]),
            Err(CliError::Table(_))
        ));
    }
}
