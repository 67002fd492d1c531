//! Observable events of a rollback invocation

use std::fmt;

/// Lifecycle events of one rollback command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file read and merged with flags
    ConfigLoaded,
    /// Effective settings report
    RollbackSettings,
    /// Selectors validated into a directive
    RollbackResolved,
    /// Engine call begins
    RollbackStart,
    /// Engine call returned success
    RollbackComplete,
    /// Validation or engine failure
    RollbackFailed,
    /// Directive resolved, engine not called
    RollbackDryRun,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RollbackSettings => "ROLLBACK_SETTINGS",
            Event::RollbackResolved => "ROLLBACK_RESOLVED",
            Event::RollbackStart => "ROLLBACK_START",
            Event::RollbackComplete => "ROLLBACK_COMPLETE",
            Event::RollbackFailed => "ROLLBACK_FAILED",
            Event::RollbackDryRun => "ROLLBACK_DRY_RUN",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Event::RollbackFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::RollbackStart.as_str(), "ROLLBACK_START");
        assert_eq!(Event::RollbackDryRun.to_string(), "ROLLBACK_DRY_RUN");
    }

    #[test]
    fn test_only_failed_is_failure() {
        assert!(Event::RollbackFailed.is_failure());
        assert!(!Event::RollbackComplete.is_failure());
    }
}
