//! Delimited-file parsing subsystem
//!
//! Turns raw text files into typed rows:
//!
//! 1. Tokenizer: one line -> ordered field strings (quoting, `""` escapes)
//! 2. Type resolver: per-column adaptive inference, locked after the first
//!    informative value
//! 3. Reader: lazy row and chunk iterators that own the file handle
//!
//! # Resilience policy
//!
//! - Missing-value tokens (`""`, `NA`, `NULL`, `NONE`) are always null
//! - Short lines are padded with nulls, long lines truncated
//! - A cell the locked parser rejects becomes null; the parse never aborts
//!   because of one malformed cell
//! - Only a missing header (`EmptySource`) or an I/O failure is fatal

mod errors;
mod reader;
mod resolver;
mod tokenizer;

pub use errors::{CsvError, CsvResult};
pub use reader::{Chunk, ChunkIter, CsvReader, RowIter, DEFAULT_CHUNK_SIZE};
pub use resolver::{ScalarKind, TypeResolver};
pub use tokenizer::{strip_bom, tokenize};
