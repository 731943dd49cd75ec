//! Two-table equality join
//!
//! Joins on exactly one column. The right side is indexed (key -> row
//! positions); each left row emits one output row per match in its key
//! bucket. Multi-key joins are expressed upstream as a synthetic composite
//! key column, never by generalizing this operator.

use std::collections::{HashMap, HashSet};

use crate::scalar::Scalar;

use super::errors::{TableError, TableResult};
use super::frame::Table;

/// Join variants supported by the in-memory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Matched rows only
    Inner,
    /// All left rows; unmatched left rows get null right columns
    Left,
    /// Inner plus unmatched right rows with null left columns
    Right,
}

impl JoinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "inner",
            JoinKind::Left => "left",
            JoinKind::Right => "right",
        }
    }
}

/// Builds the transient key -> row-positions index over one column.
pub(crate) fn build_key_index(column: &[Scalar]) -> HashMap<Scalar, Vec<usize>> {
    let mut index: HashMap<Scalar, Vec<usize>> = HashMap::new();
    for (i, key) in column.iter().enumerate() {
        index.entry(key.clone()).or_default().push(i);
    }
    index
}

/// Output column layout for a join: all left columns, then every right
/// column except the key, suffixed only when it collides with a left name.
pub(crate) fn joined_column_names(
    left: &[String],
    right: &[String],
    on: &str,
    suffix: &str,
) -> Vec<String> {
    let mut names: Vec<String> = left.to_vec();
    for name in right {
        if name == on {
            continue;
        }
        if left.iter().any(|l| l == name) {
            names.push(format!("{}{}", name, suffix));
        } else {
            names.push(name.clone());
        }
    }
    names
}

impl Table {
    /// Equality join with `other` on the single column `on`.
    ///
    /// Output columns are this table's columns followed by `other`'s non-key
    /// columns; a right column whose name already exists on the left gets
    /// `suffix` appended. Left column names are never suffixed.
    ///
    /// Null keys match each other, as a null is a value like any other to
    /// the index.
    ///
    /// # Errors
    /// `MissingJoinKey` if `on` is absent from either table.
    pub fn join(
        &self,
        other: &Table,
        on: &str,
        kind: JoinKind,
        suffix: &str,
    ) -> TableResult<Table> {
        let left_key = self
            .column_index(on)
            .ok_or_else(|| TableError::MissingJoinKey(on.to_string()))?;
        let right_key = other
            .column_index(on)
            .ok_or_else(|| TableError::MissingJoinKey(on.to_string()))?;

        let right_index = build_key_index(&other.columns[right_key]);
        let right_nonkey: Vec<usize> = (0..other.n_cols()).filter(|&i| i != right_key).collect();

        let names = joined_column_names(&self.names, &other.names, on, suffix);
        let mut columns: Vec<Vec<Scalar>> = names.iter().map(|_| Vec::new()).collect();
        let n_left = self.n_cols();

        let mut emit = |left_row: Option<usize>, right_row: Option<usize>| {
            for (c, col) in columns.iter_mut().take(n_left).enumerate() {
                col.push(match left_row {
                    Some(i) => self.columns[c][i].clone(),
                    None => Scalar::Null,
                });
            }
            for (slot, &rc) in columns.iter_mut().skip(n_left).zip(&right_nonkey) {
                slot.push(match right_row {
                    Some(j) => other.columns[rc][j].clone(),
                    None => Scalar::Null,
                });
            }
        };

        for i in 0..self.n_rows {
            let key = &self.columns[left_key][i];
            match right_index.get(key) {
                Some(matches) => {
                    for &j in matches {
                        emit(Some(i), Some(j));
                    }
                }
                None => {
                    if kind == JoinKind::Left {
                        emit(Some(i), None);
                    }
                }
            }
        }

        if kind == JoinKind::Right {
            let left_keys: HashSet<&Scalar> = self.columns[left_key].iter().collect();
            for (j, key) in other.columns[right_key].iter().enumerate() {
                if !left_keys.contains(key) {
                    emit(None, Some(j));
                }
            }
        }

        let out = names.into_iter().zip(columns).collect();
        Table::new(out)
    }
}
