//! Streaming group-by
//!
//! Folds every chunk into one shared accumulator map and finalizes exactly
//! like the whole-table `Table::group_by`. All supported aggregates are
//! associative and commutative over partitions, so the result values are
//! independent of chunk size; only group order may differ.

use tracing::debug;

use crate::csv::{Chunk, CsvReader, CsvResult};
use crate::table::{Aggregate, GroupBuilder, Table};

use super::errors::StreamResult;

/// Aggregates a chunk stream without materializing the source.
///
/// Peak memory is one chunk plus the accumulator map (one entry per distinct
/// key tuple).
pub fn group_by_chunks(
    chunks: impl IntoIterator<Item = CsvResult<Chunk>>,
    keys: &[&str],
    spec: &[(&str, Aggregate)],
) -> StreamResult<Table> {
    let mut builder = GroupBuilder::new(keys, spec);
    let mut chunk_count = 0usize;
    let mut row_count = 0usize;

    for chunk in chunks {
        let chunk = chunk?;
        chunk_count += 1;
        row_count += chunk.len();
        for row in &chunk {
            builder.update(row)?;
        }
    }

    debug!(chunks = chunk_count, rows = row_count, "streaming group-by finalized");
    Ok(builder.finish()?)
}

/// Opens `reader` in chunked mode and aggregates it.
pub fn group_by_csv(
    reader: &CsvReader,
    chunk_size: usize,
    keys: &[&str],
    spec: &[(&str, Aggregate)],
) -> StreamResult<Table> {
    group_by_chunks(reader.chunks(chunk_size)?, keys, spec)
}
