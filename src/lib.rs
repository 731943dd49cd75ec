//! flatdb - analytical queries over large delimited text files, no database
//! server required
//!
//! The engine implements, from raw bytes, the primitives a database executor
//! provides: quoted-field tokenizing, adaptive per-column type inference, an
//! in-memory columnar table with projection/filter/sort/group-by/join, and
//! chunked streaming operators that keep peak memory bounded for files
//! larger than memory.
//!
//! Every entry point re-reads its source files from scratch; no state is
//! shared or cached between calls.

pub mod analytics;
pub mod cli;
pub mod csv;
pub mod row;
pub mod scalar;
pub mod stream;
pub mod table;

pub use row::Row;
pub use scalar::Scalar;
pub use table::Table;
