//! Structured JSON logger
//!
//! - One log line = one event
//! - Keys in deterministic (alphabetical) order after `event` and `severity`
//! - Synchronous, unbuffered, always stderr (stdout carries the command result)

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;

use serde_json::{Map, Value};
use uuid::Uuid;

static INVOCATION_ID: OnceLock<Uuid> = OnceLock::new();

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that outputs JSON logs
pub struct Logger;

impl Logger {
    /// Tag every following record with `invocation_id`. First call wins.
    pub fn init_invocation(id: Uuid) -> Uuid {
        *INVOCATION_ID.get_or_init(|| id)
    }

    /// Id of the current invocation, if one was set
    pub fn invocation_id() -> Option<Uuid> {
        INVOCATION_ID.get().copied()
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    pub(crate) fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut line = render(severity, event, fields, Self::invocation_id());
        line.push('\n');

        // Logging never fails the command
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }
}

/// Render one record as a single JSON object.
///
/// `serde_json::Map` is ordered by key, so user fields come out sorted.
fn render(severity: Severity, event: &str, fields: &[(&str, &str)], invocation: Option<Uuid>) -> String {
    let mut rest = Map::new();
    if let Some(id) = invocation {
        rest.insert("invocation_id".to_string(), Value::String(id.to_string()));
    }
    for (key, value) in fields {
        rest.insert((*key).to_string(), Value::String((*value).to_string()));
    }

    let head = format!(
        "{{\"event\":{},\"severity\":\"{}\"",
        Value::String(event.to_string()),
        severity.as_str()
    );
    let body = Value::Object(rest).to_string();
    if body == "{}" {
        format!("{}}}", head)
    } else {
        format!("{},{}", head, &body[1..])
    }
}

/// Capture logs to a buffer for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
