//! Streaming operators
//!
//! Chunk-wise counterparts of the table operations, for files larger than
//! memory. Each operator consumes a chunk source lazily and bounds its own
//! peak memory to roughly one chunk (plus, for group-by and join, the
//! accumulator map or small-side index).
//!
//! # Contracts
//!
//! - `group_by_chunks` is value-equivalent to `Table::group_by` for every
//!   chunk size; only group order may differ.
//! - `FilterProject` yields surviving rows in source order, one chunk
//!   buffered at a time.
//! - `StreamJoin` materializes only the small side; output follows big-side
//!   order; inner and left joins only.
//! - `SortedChunks` yields chunk-local sorted runs, not a global order.

mod errors;
mod filter_project;
mod group_by;
mod join;
mod order_by;

pub use errors::{StreamError, StreamResult};
pub use filter_project::{keep_all, non_null, FilterProject};
pub use group_by::{group_by_chunks, group_by_csv};
pub use join::StreamJoin;
pub use order_by::SortedChunks;
