//! Columnar table subsystem
//!
//! An in-memory relation supporting projection, filtering, positional
//! slicing, stable multi-key sorting, grouped aggregation, and two-table
//! equality joins.
//!
//! # Invariants
//!
//! - Every column of a table has the same length, equal to its row count;
//!   construction rejects anything else.
//! - Operations never mutate their inputs; each returns a new table.
//! - These paths materialize their full result in memory: peak memory scales
//!   with result cardinality, not chunk size. The `stream` subsystem exists
//!   for inputs that must stay bounded.

mod errors;
mod frame;
mod group;
mod join;

pub use errors::{TableError, TableResult};
pub use frame::{SortDirection, Table};
pub use group::{Aggregate, GroupBuilder};
pub use join::JoinKind;

pub(crate) use join::{build_key_index, joined_column_names};
