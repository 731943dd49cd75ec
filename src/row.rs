//! Row records
//!
//! A `Row` is an ordered mapping from column name to `Scalar`. The column
//! name slice is shared (`Arc`) across every row produced from the same
//! source, so cloning a row clones only its values.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::scalar::Scalar;

/// One record: column names plus one scalar per column.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Scalar>,
}

impl Row {
    /// Creates a row. `values` must be the same length as `columns`.
    pub fn new(columns: Arc<[String]>, values: Vec<Scalar>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Column names, in order.
    pub fn columns(&self) -> &Arc<[String]> {
        &self.columns
    }

    /// Values, in column order.
    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    /// Consumes the row, returning its values.
    pub fn into_values(self) -> Vec<Scalar> {
        self.values
    }

    /// Looks up a value by column name.
    pub fn get(&self, name: &str) -> Option<&Scalar> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(&self.values[idx])
    }

    /// Iterates (name, value) pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .zip(self.values.iter())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Serializes as a JSON object with keys in column order, the shape result
/// records take on the way out.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
