//! Streaming per-chunk sort
//!
//! Sorts each chunk independently and yields the chunks back to back. The
//! output is a sequence of locally sorted runs, NOT a globally sorted
//! sequence: whenever the chunk size is smaller than the row count, rows
//! from a later chunk may sort before rows from an earlier one. This is the
//! documented contract — callers needing a total order must materialize the
//! result into a table and use `Table::order_by` instead.

use std::collections::VecDeque;

use crate::csv::{Chunk, CsvResult};
use crate::row::Row;
use crate::scalar::Scalar;
use crate::table::SortDirection;

use super::errors::{StreamError, StreamResult};

/// Lazy row sequence of chunk-local sorted runs over a single sort column.
pub struct SortedChunks<I> {
    chunks: I,
    column: String,
    direction: SortDirection,
    buffer: VecDeque<Row>,
    failed: bool,
}

impl<I> SortedChunks<I>
where
    I: Iterator<Item = CsvResult<Chunk>>,
{
    pub fn new(
        chunks: impl IntoIterator<Item = CsvResult<Chunk>, IntoIter = I>,
        column: &str,
        direction: SortDirection,
    ) -> Self {
        Self {
            chunks: chunks.into_iter(),
            column: column.to_string(),
            direction,
            buffer: VecDeque::new(),
            failed: false,
        }
    }

    fn sort_chunk(&self, mut chunk: Chunk) -> Chunk {
        chunk.sort_by(|a, b| {
            let av = a.get(&self.column).unwrap_or(&Scalar::Null);
            let bv = b.get(&self.column).unwrap_or(&Scalar::Null);
            let ordering = av.compare(bv);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        chunk
    }
}

impl<I> Iterator for SortedChunks<I>
where
    I: Iterator<Item = CsvResult<Chunk>>,
{
    type Item = StreamResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(row) = self.buffer.pop_front() {
                return Some(Ok(row));
            }
            match self.chunks.next() {
                None => return None,
                Some(Err(e)) => {
                    self.failed = true;
                    return Some(Err(StreamError::Csv(e)));
                }
                Some(Ok(chunk)) => {
                    self.buffer.extend(self.sort_chunk(chunk));
                }
            }
        }
    }
}
