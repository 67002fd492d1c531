//! Rollback target selection
//!
//! Turns the user's count, date or tag selector into a single
//! `RollbackDirective` for the migration engine. Validation happens entirely
//! here, before any engine call.

mod date;
mod directive;
mod errors;
mod resolver;

pub use date::{format_for_engine, parse_iso, parse_rollback_date, ENGINE_DATE_FORMAT};
pub use directive::{ContextFilter, RollbackDirective};
pub use errors::{IsoParseError, RollbackError, RollbackResult, ISO_LAYOUTS};
pub use resolver::{resolve, RollbackRequest, COUNT_NOT_SET};
