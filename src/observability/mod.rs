//! Observability for rollback invocations
//!
//! Structured one-line JSON records on stderr, each tagged with the
//! invocation id.
//!
//! ```ignore
//! use migrate_rollback::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RollbackStart, &[("selector", "tag")]);
//! ```

use std::io::{self, Write};

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    write_event(event, fields, &mut io::stderr());
}

fn write_event<W: Write>(event: Event, fields: &[(&str, &str)], writer: &mut W) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log_to_writer(severity, event.as_str(), fields, writer);
}
