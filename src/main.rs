//! migrate-rollback CLI entry point
//!
//! This is a minimal entrypoint that:
//! 1. Parses CLI arguments (via cli::run)
//! 2. Dispatches to the rollback command (via cli::run)
//! 3. Prints errors and their causes to stderr
//! 4. Exits with non-zero on failure

use std::error::Error;

use migrate_rollback::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        let mut cause = e.source();
        while let Some(inner) = cause {
            eprintln!("  caused by: {}", inner);
            cause = inner.source();
        }
        std::process::exit(1);
    }
}
