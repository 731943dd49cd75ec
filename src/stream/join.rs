//! Streaming small-big join
//!
//! The small relation is materialized and indexed once; the big relation is
//! streamed chunk by chunk and probed against the index per row. Output rows
//! come out in big-side order. Only inner and left joins are supported: a
//! right join would need the full set of unmatched small rows tracked until
//! the stream ends, which this operator deliberately avoids.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::debug;

use crate::csv::{Chunk, CsvResult};
use crate::row::Row;
use crate::scalar::Scalar;
use crate::table::{build_key_index, joined_column_names, JoinKind, Table, TableError};

use super::errors::{StreamError, StreamResult};

/// Lazy row sequence joining a streamed big side against an indexed small
/// table.
pub struct StreamJoin<'a, I> {
    chunks: I,
    small: &'a Table,
    index: HashMap<Scalar, Vec<usize>>,
    small_nonkey: Vec<usize>,
    on: String,
    kind: JoinKind,
    suffix: String,
    // Output header, fixed by the first streamed row
    out_columns: Option<Arc<[String]>>,
    buffer: VecDeque<Row>,
    failed: bool,
}

impl<'a, I> StreamJoin<'a, I>
where
    I: Iterator<Item = CsvResult<Chunk>>,
{
    /// Builds the index over `small` and prepares to stream `chunks`.
    ///
    /// # Errors
    /// `UnsupportedJoin` for anything but inner/left; `MissingJoinKey` if
    /// `on` is absent from the small table.
    pub fn new(
        chunks: impl IntoIterator<Item = CsvResult<Chunk>, IntoIter = I>,
        small: &'a Table,
        on: &str,
        kind: JoinKind,
        suffix: &str,
    ) -> StreamResult<Self> {
        if !matches!(kind, JoinKind::Inner | JoinKind::Left) {
            return Err(StreamError::UnsupportedJoin(kind.as_str().to_string()));
        }
        let key_column = small
            .column(on)
            .ok_or_else(|| TableError::MissingJoinKey(on.to_string()))?;
        let index = build_key_index(key_column);
        let small_nonkey: Vec<usize> = small
            .column_names()
            .iter()
            .enumerate()
            .filter(|(_, name)| name.as_str() != on)
            .map(|(i, _)| i)
            .collect();

        debug!(
            small_rows = small.n_rows(),
            distinct_keys = index.len(),
            "built streaming join index"
        );

        Ok(Self {
            chunks: chunks.into_iter(),
            small,
            index,
            small_nonkey,
            on: on.to_string(),
            kind,
            suffix: suffix.to_string(),
            out_columns: None,
            buffer: VecDeque::new(),
            failed: false,
        })
    }

    fn out_columns_for(&mut self, big_row: &Row) -> Arc<[String]> {
        if let Some(columns) = &self.out_columns {
            return Arc::clone(columns);
        }
        let names: Arc<[String]> = joined_column_names(
            &big_row.columns()[..],
            self.small.column_names(),
            &self.on,
            &self.suffix,
        )
        .into();
        self.out_columns = Some(Arc::clone(&names));
        names
    }

    fn process_chunk(&mut self, chunk: Chunk) -> StreamResult<()> {
        for row in chunk {
            let key = row
                .get(&self.on)
                .ok_or_else(|| TableError::MissingJoinKey(self.on.clone()))?
                .clone();
            let columns = self.out_columns_for(&row);

            match self.index.get(&key) {
                Some(matches) => {
                    for &j in matches {
                        let mut values = row.values().to_vec();
                        for &c in &self.small_nonkey {
                            values.push(self.small.columns[c][j].clone());
                        }
                        self.buffer.push_back(Row::new(Arc::clone(&columns), values));
                    }
                }
                None => {
                    if self.kind == JoinKind::Left {
                        let mut values = row.into_values();
                        values.extend(self.small_nonkey.iter().map(|_| Scalar::Null));
                        self.buffer.push_back(Row::new(columns, values));
                    }
                }
            }
        }
        Ok(())
    }
}

impl<'a, I> Iterator for StreamJoin<'a, I>
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
                    if let Err(e) = self.process_chunk(chunk) {
                        self.failed = true;
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}
