//! In-memory columnar table
//!
//! A `Table` maps column names to equal-length scalar columns. Column
//! insertion order is preserved for output but carries no semantics. Every
//! operation returns a new table; nothing mutates in place.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::row::Row;
use crate::scalar::Scalar;

use super::errors::{TableError, TableResult};

/// Sort direction for one `order_by` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Columnar relation: ordered column names plus one scalar vector per column.
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) names: Arc<[String]>,
    pub(crate) columns: Vec<Vec<Scalar>>,
    pub(crate) n_rows: usize,
}

impl Table {
    /// Builds a table from (name, column) pairs.
    ///
    /// # Errors
    /// `UnequalColumnLength` unless every column has the same length.
    pub fn new(columns: Vec<(String, Vec<Scalar>)>) -> TableResult<Self> {
        let n_rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        if columns.iter().any(|(_, c)| c.len() != n_rows) {
            return Err(TableError::UnequalColumnLength);
        }

        let (names, columns): (Vec<String>, Vec<Vec<Scalar>>) = columns.into_iter().unzip();
        Ok(Self {
            names: names.into(),
            columns,
            n_rows,
        })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            names: Vec::new().into(),
            columns: Vec::new(),
            n_rows: 0,
        }
    }

    /// Builds a table from a row sequence.
    ///
    /// The first row fixes the column set and order; later rows are looked up
    /// by name, with absent names becoming null. An empty sequence yields an
    /// empty table.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        let mut iter = rows.into_iter();
        let first = match iter.next() {
            Some(row) => row,
            None => return Self::empty(),
        };

        let names = Arc::clone(first.columns());
        let mut columns: Vec<Vec<Scalar>> = names.iter().map(|_| Vec::new()).collect();
        let mut n_rows = 0;

        let mut push = |columns: &mut Vec<Vec<Scalar>>, row: Row| {
            if Arc::ptr_eq(row.columns(), &names) {
                // Same source: values are already in column order
                for (col, value) in columns.iter_mut().zip(row.into_values()) {
                    col.push(value);
                }
            } else {
                for (i, name) in names.iter().enumerate() {
                    columns[i].push(row.get(name).cloned().unwrap_or(Scalar::Null));
                }
            }
        };

        push(&mut columns, first);
        n_rows += 1;
        for row in iter {
            push(&mut columns, row);
            n_rows += 1;
        }

        Self {
            names,
            columns,
            n_rows,
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// The values of one column, if it exists.
    pub fn column(&self, name: &str) -> Option<&[Scalar]> {
        let idx = self.column_index(name)?;
        Some(&self.columns[idx])
    }

    /// True when the table has the named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Materializes row `i`. Panics if out of bounds.
    pub fn row(&self, i: usize) -> Row {
        let values = self.columns.iter().map(|c| c[i].clone()).collect();
        Row::new(Arc::clone(&self.names), values)
    }

    /// Iterates all rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.n_rows).map(|i| self.row(i))
    }

    /// Returns a table with exactly the requested columns, in that order.
    /// Row count and row order are unchanged.
    ///
    /// # Errors
    /// `MissingColumn` if any requested column does not exist.
    pub fn project(&self, cols: &[&str]) -> TableResult<Table> {
        let mut out = Vec::with_capacity(cols.len());
        for &name in cols {
            let idx = self
                .column_index(name)
                .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
            out.push((name.to_string(), self.columns[idx].clone()));
        }
        Table::new(out)
    }

    /// Keeps the rows for which `predicate` holds, preserving their order.
    pub fn filter(&self, predicate: impl Fn(&Row) -> bool) -> Table {
        let keep: Vec<usize> = (0..self.n_rows)
            .filter(|&i| predicate(&self.row(i)))
            .collect();
        self.take(&keep)
    }

    /// First `n` rows.
    pub fn limit(&self, n: usize) -> Table {
        self.slice(0, n.min(self.n_rows))
    }

    /// Rows from position `m` onward.
    pub fn offset(&self, m: usize) -> Table {
        self.slice(m.min(self.n_rows), self.n_rows)
    }

    /// First `n` rows (alias of `limit` kept for the caller contract).
    pub fn head(&self, n: usize) -> Table {
        self.limit(n)
    }

    /// Last `n` rows; `tail(0)` is empty.
    pub fn tail(&self, n: usize) -> Table {
        let start = self.n_rows.saturating_sub(n);
        self.slice(start, self.n_rows)
    }

    /// Stable multi-key sort.
    ///
    /// Each key applies its own direction; keys compose lexicographically. A
    /// descending key reverses its comparator rather than negating values,
    /// so non-numeric types sort correctly.
    ///
    /// # Errors
    /// `MissingColumn` if any sort column does not exist.
    pub fn order_by(&self, keys: &[(&str, SortDirection)]) -> TableResult<Table> {
        if keys.is_empty() {
            return Ok(self.clone());
        }

        let mut resolved = Vec::with_capacity(keys.len());
        for &(name, direction) in keys {
            let idx = self
                .column_index(name)
                .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
            resolved.push((idx, direction));
        }

        let mut order: Vec<usize> = (0..self.n_rows).collect();
        order.sort_by(|&a, &b| {
            for &(idx, direction) in &resolved {
                let col = &self.columns[idx];
                let ordering = col[a].compare(&col[b]);
                let ordering = match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        Ok(self.take(&order))
    }

    /// New table holding the rows at `indices`, in that order.
    pub(crate) fn take(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|col| indices.iter().map(|&i| col[i].clone()).collect())
            .collect();
        Table {
            names: Arc::clone(&self.names),
            columns,
            n_rows: indices.len(),
        }
    }

    fn slice(&self, start: usize, end: usize) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|col| col[start..end].to_vec())
            .collect();
        Table {
            names: Arc::clone(&self.names),
            columns,
            n_rows: end - start,
        }
    }
}
