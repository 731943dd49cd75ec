//! CLI subsystem
//!
//! Thin terminal frontend over the engine entry points. All output is a JSON
//! array of records on stdout; diagnostics go to stderr via `tracing`.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, RankBy};
pub use commands::run;
pub use errors::{CliError, CliResult};
