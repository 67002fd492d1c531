//! CLI module
//!
//! Provides the `rollback` command: resolve exactly one rollback selector and
//! forward it to the migration engine.

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, RollbackArgs};
pub use commands::{execute, rollback, run, run_command, RollbackOutcome};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_response_to};
