//! CLI module for the vehicle listing schema
//!
//! Provides command-line interface for:
//! - validate: Validate one record from stdin
//! - indexes: Explain the index plan of a revision
//! - check: Verify every revision assembles and plans cleanly

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, indexes, run, run_command, validate, validate_record};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{read_from, read_request, write_error, write_response};
