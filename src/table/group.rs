//! Grouped aggregation
//!
//! `GroupBuilder` holds the per-group accumulator state shared by the
//! whole-table `group_by` and the streaming operator: one accumulator per
//! (group key tuple, aggregation-spec entry), updated a row at a time and
//! finalized into a result table. All supported aggregates are associative
//! and commutative over partitions, so feeding rows in chunks of any size
//! produces the same values.

use std::collections::HashMap;
use std::str::FromStr;

use crate::row::Row;
use crate::scalar::Scalar;

use super::errors::{TableError, TableResult};
use super::frame::Table;

/// Supported aggregate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    /// Sum of values; null counts as 0
    Sum,
    /// Mean of non-null values; null result when every value is null
    Avg,
    /// Smallest non-null value; null when every value is null
    Min,
    /// Largest non-null value; null when every value is null
    Max,
    /// Row count, nulls included
    Count,
    /// Count of non-null values in the named column
    CountCol,
}

impl Aggregate {
    /// Deterministic output column name for this aggregate over `column`.
    pub fn output_name(&self, column: &str) -> String {
        match self {
            Aggregate::Sum => format!("sum_{}", column),
            Aggregate::Avg => format!("avg_{}", column),
            Aggregate::Min => format!("min_{}", column),
            Aggregate::Max => format!("max_{}", column),
            Aggregate::Count => "count_all".to_string(),
            Aggregate::CountCol => format!("count_{}", column),
        }
    }
}

/// Parses the spelling used by external callers (aggregation specs arrive as
/// strings from the command line).
impl FromStr for Aggregate {
    type Err = TableError;

    fn from_str(s: &str) -> TableResult<Self> {
        match s {
            "sum" => Ok(Aggregate::Sum),
            "avg" => Ok(Aggregate::Avg),
            "min" => Ok(Aggregate::Min),
            "max" => Ok(Aggregate::Max),
            "count" => Ok(Aggregate::Count),
            "count_col" => Ok(Aggregate::CountCol),
            other => Err(TableError::UnsupportedAggregate(other.to_string())),
        }
    }
}

/// Running state for one (group, spec entry) pair.
#[derive(Debug, Clone)]
enum AggState {
    Sum { total: f64 },
    Avg { total: f64, count: u64 },
    Min { current: Scalar },
    Max { current: Scalar },
    Count { rows: u64 },
    CountCol { non_null: u64 },
}

impl AggState {
    fn new(kind: Aggregate) -> Self {
        match kind {
            Aggregate::Sum => AggState::Sum { total: 0.0 },
            Aggregate::Avg => AggState::Avg {
                total: 0.0,
                count: 0,
            },
            Aggregate::Min => AggState::Min {
                current: Scalar::Null,
            },
            Aggregate::Max => AggState::Max {
                current: Scalar::Null,
            },
            Aggregate::Count => AggState::Count { rows: 0 },
            Aggregate::CountCol => AggState::CountCol { non_null: 0 },
        }
    }

    fn update(&mut self, value: &Scalar) {
        match self {
            AggState::Sum { total } => {
                *total += value.as_f64().unwrap_or(0.0);
            }
            AggState::Avg { total, count } => {
                if let Some(v) = value.as_f64() {
                    *total += v;
                    *count += 1;
                }
            }
            AggState::Min { current } => {
                if !value.is_null()
                    && (current.is_null() || value.compare(current).is_lt())
                {
                    *current = value.clone();
                }
            }
            AggState::Max { current } => {
                if !value.is_null()
                    && (current.is_null() || value.compare(current).is_gt())
                {
                    *current = value.clone();
                }
            }
            AggState::Count { rows } => {
                *rows += 1;
            }
            AggState::CountCol { non_null } => {
                if !value.is_null() {
                    *non_null += 1;
                }
            }
        }
    }

    fn finalize(self) -> Scalar {
        match self {
            AggState::Sum { total } => Scalar::Float(total),
            AggState::Avg { total, count } => {
                if count > 0 {
                    Scalar::Float(total / count as f64)
                } else {
                    Scalar::Null
                }
            }
            AggState::Min { current } => current,
            AggState::Max { current } => current,
            AggState::Count { rows } => Scalar::Int(rows as i64),
            AggState::CountCol { non_null } => Scalar::Int(non_null as i64),
        }
    }
}

/// Accumulates rows into per-group aggregate state.
///
/// Group output order is first-occurrence order of each key tuple, tracked
/// with an insertion vector beside the lookup map.
pub struct GroupBuilder {
    keys: Vec<String>,
    spec: Vec<(String, Aggregate)>,
    lookup: HashMap<Vec<Scalar>, usize>,
    groups: Vec<(Vec<Scalar>, Vec<AggState>)>,
}

impl GroupBuilder {
    pub fn new(keys: &[&str], spec: &[(&str, Aggregate)]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            spec: spec.iter().map(|(c, a)| (c.to_string(), *a)).collect(),
            lookup: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Folds one row into its group's accumulators.
    ///
    /// # Errors
    /// `MissingColumn` if a key or aggregated column is absent from the row.
    pub fn update(&mut self, row: &Row) -> TableResult<()> {
        let mut key = Vec::with_capacity(self.keys.len());
        for name in &self.keys {
            let value = row
                .get(name)
                .ok_or_else(|| TableError::MissingColumn(name.clone()))?;
            key.push(value.clone());
        }

        let idx = match self.lookup.get(&key) {
            Some(&idx) => idx,
            None => {
                let states = self.spec.iter().map(|(_, agg)| AggState::new(*agg)).collect();
                self.groups.push((key.clone(), states));
                self.lookup.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        for (entry, (column, _)) in self.groups[idx].1.iter_mut().zip(&self.spec) {
            let value = row
                .get(column)
                .ok_or_else(|| TableError::MissingColumn(column.clone()))?;
            entry.update(value);
        }
        Ok(())
    }

    /// Finalizes accumulators into a result table: one row per group, one
    /// column per key plus one derived column per spec entry.
    pub fn finish(self) -> TableResult<Table> {
        let mut out: Vec<(String, Vec<Scalar>)> = self
            .keys
            .iter()
            .map(|k| (k.clone(), Vec::with_capacity(self.groups.len())))
            .collect();
        for (column, agg) in &self.spec {
            out.push((agg.output_name(column), Vec::with_capacity(self.groups.len())));
        }

        let n_keys = self.keys.len();
        for (key, states) in self.groups {
            for (slot, value) in out.iter_mut().take(n_keys).zip(key) {
                slot.1.push(value);
            }
            for (slot, state) in out.iter_mut().skip(n_keys).zip(states) {
                slot.1.push(state.finalize());
            }
        }

        Table::new(out)
    }
}

impl Table {
    /// Groups rows by `keys` and evaluates `spec` per group.
    ///
    /// Output columns are the keys followed by one derived column per spec
    /// entry, named by [`Aggregate::output_name`]. Groups appear in
    /// first-occurrence order.
    ///
    /// # Errors
    /// `MissingColumn` if a key or aggregated column does not exist.
    pub fn group_by(&self, keys: &[&str], spec: &[(&str, Aggregate)]) -> TableResult<Table> {
        for &name in keys.iter().chain(spec.iter().map(|(c, _)| c)) {
            if !self.has_column(name) {
                return Err(TableError::MissingColumn(name.to_string()));
            }
        }

        let mut builder = GroupBuilder::new(keys, spec);
        for row in self.iter_rows() {
            builder.update(&row)?;
        }
        builder.finish()
    }
}
