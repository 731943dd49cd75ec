//! Streaming filter-project
//!
//! Applies a predicate and optional projection chunk by chunk, yielding rows
//! lazily. At most one chunk of surviving rows is buffered at a time.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::csv::{Chunk, CsvResult};
use crate::row::Row;
use crate::scalar::Scalar;
use crate::table::TableError;

use super::errors::{StreamError, StreamResult};

/// Lazy row sequence: predicate plus optional projection over a chunk source.
pub struct FilterProject<I, F> {
    chunks: I,
    predicate: F,
    projection: Option<Arc<[String]>>,
    buffer: VecDeque<Row>,
    failed: bool,
}

impl<I, F> FilterProject<I, F>
where
    I: Iterator<Item = CsvResult<Chunk>>,
    F: Fn(&Row) -> bool,
{
    /// Filters `chunks` with `predicate`, keeping every column.
    pub fn new(chunks: impl IntoIterator<Item = CsvResult<Chunk>, IntoIter = I>, predicate: F) -> Self {
        Self {
            chunks: chunks.into_iter(),
            predicate,
            projection: None,
            buffer: VecDeque::new(),
            failed: false,
        }
    }

    /// Filters and additionally projects surviving rows onto `columns`.
    pub fn with_projection(
        chunks: impl IntoIterator<Item = CsvResult<Chunk>, IntoIter = I>,
        predicate: F,
        columns: &[&str],
    ) -> Self {
        let projection: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        Self {
            chunks: chunks.into_iter(),
            predicate,
            projection: Some(projection.into()),
            buffer: VecDeque::new(),
            failed: false,
        }
    }

    fn project_row(&self, row: Row) -> StreamResult<Row> {
        let columns = match &self.projection {
            Some(columns) => columns,
            None => return Ok(row),
        };

        let mut values = Vec::with_capacity(columns.len());
        for name in columns.iter() {
            let value = row
                .get(name)
                .cloned()
                .ok_or_else(|| TableError::MissingColumn(name.clone()))?;
            values.push(value);
        }
        Ok(Row::new(Arc::clone(columns), values))
    }
}

impl<I, F> Iterator for FilterProject<I, F>
where
    I: Iterator<Item = CsvResult<Chunk>>,
    F: Fn(&Row) -> bool,
{
    type Item = StreamResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(row) = self.buffer.pop_front() {
                match self.project_row(row) {
                    Ok(row) => return Some(Ok(row)),
                    Err(e) => {
                        self.failed = true;
                        return Some(Err(e));
                    }
                }
            }

            match self.chunks.next() {
                None => return None,
                Some(Err(e)) => {
                    self.failed = true;
                    return Some(Err(StreamError::Csv(e)));
                }
                Some(Ok(chunk)) => {
                    self.buffer
                        .extend(chunk.into_iter().filter(|row| (self.predicate)(row)));
                }
            }
        }
    }
}

/// Keeps every row; used when the caller only wants the projection.
pub fn keep_all(_row: &Row) -> bool {
    true
}

/// Convenience: true when the named column is non-null in the row.
pub fn non_null(row: &Row, column: &str) -> bool {
    !matches!(row.get(column), None | Some(Scalar::Null))
}
