//! CSV Reader Tests
//!
//! End-to-end behavior of the delimited-file source:
//! - Header handling (BOM, empty source)
//! - Line terminators (\n, \r\n, bare \r)
//! - Quoting and escaped quotes
//! - Per-column type inference and lock behavior
//! - Malformed-line padding/truncation
//! - Chunked iteration boundaries

use std::fs;
use std::path::PathBuf;

use flatdb::csv::{CsvError, CsvReader};
use flatdb::{Row, Scalar};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn all_rows(reader: &CsvReader) -> Vec<Row> {
    reader.rows().unwrap().map(|r| r.unwrap()).collect()
}

// =============================================================================
// Header Tests
// =============================================================================

/// Leading byte-order mark is stripped from the first header field only.
#[test]
fn test_bom_stripped_from_header() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "bom.csv", "\u{feff}Name,Year\nA,2000\n");

    let reader = CsvReader::new(&path);
    assert_eq!(reader.headers().unwrap(), vec!["Name", "Year"]);
}

/// A file with no header line is an EmptySource error, not a silent empty
/// result.
#[test]
fn test_empty_file_is_empty_source() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "empty.csv", "");

    let reader = CsvReader::new(&path);
    assert!(matches!(reader.rows(), Err(CsvError::EmptySource(_))));
    assert!(matches!(reader.headers(), Err(CsvError::EmptySource(_))));
}

/// Header-only files yield zero rows.
#[test]
fn test_header_only_file_yields_no_rows() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "header_only.csv", "a,b,c\n");

    assert!(all_rows(&CsvReader::new(&path)).is_empty());
}

// =============================================================================
// Line Terminator Tests
// =============================================================================

/// \n, \r\n, and bare \r are all accepted, even mixed in one file.
#[test]
fn test_mixed_line_terminators() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "mixed.csv", "v\n1\r\n2\r3\n");

    let rows = all_rows(&CsvReader::new(&path));
    let values: Vec<_> = rows.iter().map(|r| r.get("v").cloned().unwrap()).collect();
    assert_eq!(
        values,
        vec![Scalar::Int(1), Scalar::Int(2), Scalar::Int(3)]
    );
}

// =============================================================================
// Quoting Tests
// =============================================================================

/// Quoted separators stay literal; doubled quotes collapse to one.
#[test]
fn test_quoted_fields_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(
        &tmp,
        "quoted.csv",
        "a,b,c\n1,\"x,y\",\"He said \"\"hi\"\"\"\n",
    );

    let rows = all_rows(&CsvReader::new(&path));
    assert_eq!(rows[0].get("b"), Some(&Scalar::Text("x,y".into())));
    assert_eq!(
        rows[0].get("c"),
        Some(&Scalar::Text("He said \"hi\"".into()))
    );
}

// =============================================================================
// Type Inference Tests
// =============================================================================

/// End-to-end inference: typed values and nulls per row.
#[test]
fn test_typed_rows_with_missing_tokens() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(
        &tmp,
        "events.csv",
        "Name,Year,Medal\nA,2000,Gold\nB,,NA\n",
    );

    let rows = all_rows(&CsvReader::new(&path));
    assert_eq!(rows[0].get("Name"), Some(&Scalar::Text("A".into())));
    assert_eq!(rows[0].get("Year"), Some(&Scalar::Int(2000)));
    assert_eq!(rows[0].get("Medal"), Some(&Scalar::Text("Gold".into())));
    assert_eq!(rows[1].get("Year"), Some(&Scalar::Null));
    assert_eq!(rows[1].get("Medal"), Some(&Scalar::Null));
}

/// A column locked to integer resolves a later float cell to null rather
/// than re-inferring.
#[test]
fn test_locked_integer_column_nulls_float_cell() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "lock.csv", "n\n3\n3.2\n4\n");

    let rows = all_rows(&CsvReader::new(&path));
    assert_eq!(rows[0].get("n"), Some(&Scalar::Int(3)));
    assert_eq!(rows[1].get("n"), Some(&Scalar::Null));
    assert_eq!(rows[2].get("n"), Some(&Scalar::Int(4)));
}

/// Leading missing tokens leave the column free to infer from the first
/// informative value.
#[test]
fn test_missing_values_do_not_lock_column() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "late.csv", "x\nNA\n\n1.5\n");

    let rows = all_rows(&CsvReader::new(&path));
    assert_eq!(rows[0].get("x"), Some(&Scalar::Null));
    assert_eq!(rows[1].get("x"), Some(&Scalar::Null));
    assert_eq!(rows[2].get("x"), Some(&Scalar::Float(1.5)));
}

/// Boolean inference covers the whole accepted token set.
#[test]
fn test_boolean_column() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "flags.csv", "flag\ntrue\nno\nY\n");

    let rows = all_rows(&CsvReader::new(&path));
    assert_eq!(rows[0].get("flag"), Some(&Scalar::Bool(true)));
    assert_eq!(rows[1].get("flag"), Some(&Scalar::Bool(false)));
    assert_eq!(rows[2].get("flag"), Some(&Scalar::Bool(true)));
}

// =============================================================================
// Malformed Line Tests
// =============================================================================

/// Short lines pad missing trailing fields with null; long lines truncate.
#[test]
fn test_short_and_long_lines_degrade_gracefully() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "ragged.csv", "a,b,c\n1,2\n1,2,3,4\n");

    let rows = all_rows(&CsvReader::new(&path));
    assert_eq!(rows[0].get("c"), Some(&Scalar::Null));
    assert_eq!(rows[1].len(), 3);
    assert_eq!(rows[1].get("c"), Some(&Scalar::Int(3)));
}

// =============================================================================
// Chunking Tests
// =============================================================================

/// Chunks hold at most chunk_size rows; the final chunk holds the remainder.
#[test]
fn test_chunk_boundaries() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "chunks.csv", "v\n1\n2\n3\n4\n5\n6\n7\n");

    let sizes: Vec<usize> = CsvReader::new(&path)
        .chunks(3)
        .unwrap()
        .map(|c| c.unwrap().len())
        .collect();
    assert_eq!(sizes, vec![3, 3, 1]);
}

// =============================================================================
// Delimiter / Reopen Tests
// =============================================================================

/// Configurable single-character delimiter.
#[test]
fn test_custom_delimiter() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "semi.csv", "a;b\n1;2\n");

    let reader = CsvReader::with_delimiter(&path, ';');
    let rows = all_rows(&reader);
    assert_eq!(rows[0].get("b"), Some(&Scalar::Int(2)));
}

/// An exhausted iterator is done; a fresh call re-reads from scratch with
/// the same result.
#[test]
fn test_reopen_rereads_from_scratch() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "reopen.csv", "v\n1\n2\n");
    let reader = CsvReader::new(&path);

    let mut first = reader.rows().unwrap();
    assert!(first.next().is_some());
    assert!(first.next().is_some());
    assert!(first.next().is_none());
    assert!(first.next().is_none());

    assert_eq!(all_rows(&reader).len(), 2);
}
