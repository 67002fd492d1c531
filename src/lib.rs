//! migrate-rollback - rollback command for an external database migration engine
//!
//! Validates that exactly one rollback selector (count, date or tag) was
//! given, then forwards the resulting directive to the engine.

pub mod cli;
pub mod engine;
pub mod observability;
pub mod rollback;
