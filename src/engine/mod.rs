//! Migration engine seam
//!
//! The engine owns changelog parsing, change-set ordering and the applied
//! history table. This crate only reaches it through the three rollback
//! operations of `MigrationEngine`.

mod process;

use std::io;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::rollback::{ContextFilter, RollbackDirective};

pub use process::{EngineSettings, ProcessEngine, DEFAULT_ENGINE_COMMAND, PASSWORD_ENV};

/// Result type for engine calls
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure reported by the migration engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be started at all
    #[error("failed to launch migration engine '{command}'")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The engine ran and reported a failure; message is the engine's own
    #[error("{0}")]
    Failed(String),
}

/// Rollback entry points of an external migration engine.
pub trait MigrationEngine {
    /// Roll back the last `count` applied change sets.
    fn rollback_count(
        &mut self,
        count: u32,
        script: Option<&Path>,
        filter: &ContextFilter,
    ) -> EngineResult<()>;

    /// Roll back every change set applied after `date`.
    fn rollback_to_date(
        &mut self,
        date: &NaiveDateTime,
        script: Option<&Path>,
        filter: &ContextFilter,
    ) -> EngineResult<()>;

    /// Roll back every change set applied after `tag`.
    fn rollback_to_tag(
        &mut self,
        tag: &str,
        script: Option<&Path>,
        filter: &ContextFilter,
    ) -> EngineResult<()>;
}

/// Forward a resolved directive to the matching engine operation.
///
/// Single call, no retries. Engine failures are returned unchanged.
pub fn dispatch<E: MigrationEngine + ?Sized>(
    engine: &mut E,
    directive: RollbackDirective,
    script: Option<&Path>,
    filter: &ContextFilter,
) -> EngineResult<()> {
    match directive {
        RollbackDirective::ByCount { count } => engine.rollback_count(count, script, filter),
        RollbackDirective::ByDate { date } => engine.rollback_to_date(&date, script, filter),
        RollbackDirective::ByTag { tag } => engine.rollback_to_tag(&tag, script, filter),
    }
}
