//! CLI command implementations
//!
//! A rollback invocation is one validation pass followed by at most one
//! engine call. Validation failures return before the engine is touched.

use serde::Serialize;
use uuid::Uuid;

use crate::engine::{dispatch, MigrationEngine, ProcessEngine};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::rollback::{RollbackDirective, RollbackError};

use super::args::{Command, RollbackArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Result of a successful rollback invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollbackOutcome {
    pub rollback: RollbackDirective,
    pub dry_run: bool,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Rollback(args) => rollback(&args),
    }
}

/// Roll back through the configured engine executable
pub fn rollback(args: &RollbackArgs) -> CliResult<()> {
    Logger::init_invocation(Uuid::new_v4());

    let (config, path) = Config::load_optional(args.config.as_deref())?;
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(Event::ConfigLoaded, &[("source", source.as_str())]);

    let config = config.merge_args(args)?;
    let mut engine = ProcessEngine::new(config.engine_settings());

    let outcome = execute(&config, &mut engine, args.dry_run)?;

    write_response(serde_json::to_value(&outcome)?)
}

/// Resolve the configured selectors and hand the directive to `engine`.
pub fn execute<E: MigrationEngine + ?Sized>(
    config: &Config,
    engine: &mut E,
    dry_run: bool,
) -> CliResult<RollbackOutcome> {
    report_settings(config);

    let directive = config
        .rollback_request()
        .resolve()
        .map_err(|e| fail(e, "validation"))?;

    let target = directive.to_string();
    log_event_with_fields(
        Event::RollbackResolved,
        &[("selector", directive.kind()), ("target", target.as_str())],
    );

    if dry_run {
        log_event_with_fields(Event::RollbackDryRun, &[("target", target.as_str())]);
        return Ok(RollbackOutcome {
            rollback: directive,
            dry_run: true,
        });
    }

    let script = config.rollback_script.as_deref();
    if let Some(path) = script {
        if !path.exists() {
            let shown = path.display().to_string();
            Logger::warn("ROLLBACK_SCRIPT_NOT_FOUND", &[("path", shown.as_str())]);
        }
    }

    log_event_with_fields(
        Event::RollbackStart,
        &[("selector", directive.kind()), ("target", target.as_str())],
    );

    dispatch(engine, directive.clone(), script, &config.context_filter())
        .map_err(|e| fail(RollbackError::from(e), "engine"))?;

    log_event_with_fields(Event::RollbackComplete, &[("target", target.as_str())]);

    Ok(RollbackOutcome {
        rollback: directive,
        dry_run: false,
    })
}

/// Effective settings, logged before anything is validated
fn report_settings(config: &Config) {
    let fields = config.settings_fields();
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event_with_fields(Event::RollbackSettings, &borrowed);
}

fn fail(err: RollbackError, stage: &str) -> CliError {
    let fields = failure_fields(&err, stage);
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event_with_fields(Event::RollbackFailed, &borrowed);
    CliError::from(err)
}

/// Fields of the ROLLBACK_FAILED record
fn failure_fields(err: &RollbackError, stage: &str) -> Vec<(&'static str, String)> {
    let mut fields = vec![("stage", stage.to_string()), ("error", err.to_string())];
    if let Some(input) = err.rejected_input() {
        fields.push(("input", input.to_string()));
    }
    fields
}
