//! CLI-specific error types
//!
//! Every CLI error ends the invocation with a non-zero exit status.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::engine::EngineError;
use crate::rollback::RollbackError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Rollback selectors missing, conflicting or out of range
    SelectionError,
    /// Rollback date in an unsupported format
    DateFormatError,
    /// Migration engine reported a failure
    EngineFailed,
    /// I/O error (stdout)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ROLLBACK_CLI_CONFIG_ERROR",
            Self::SelectionError => "ROLLBACK_CLI_SELECTION_ERROR",
            Self::DateFormatError => "ROLLBACK_CLI_DATE_FORMAT_ERROR",
            Self::EngineFailed => "ROLLBACK_CLI_ENGINE_FAILED",
            Self::IoError => "ROLLBACK_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<RollbackError> for CliError {
    fn from(e: RollbackError) -> Self {
        let message = e.to_string();
        match e {
            RollbackError::Configuration(_) => Self::new(CliErrorCode::SelectionError, message),
            RollbackError::DateFormat { source, .. } => {
                Self::new(CliErrorCode::DateFormatError, message).with_source(source)
            }
            RollbackError::Engine(EngineError::Launch { source, .. }) => {
                Self::new(CliErrorCode::EngineFailed, message).with_source(source)
            }
            RollbackError::Engine(EngineError::Failed(_)) => {
                Self::new(CliErrorCode::EngineFailed, message)
            }
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollback::resolve;

    #[test]
    fn test_selection_error_keeps_message() {
        let err = CliError::from(RollbackError::multiple_selectors());
        assert_eq!(err.code(), &CliErrorCode::SelectionError);
        assert_eq!(
            err.to_string(),
            "ROLLBACK_CLI_SELECTION_ERROR: Cannot specify multiple rollbackXXX options, \
             please select only one of rollbackTag, rollbackCount, rollbackDate."
        );
    }

    #[test]
    fn test_date_format_error_keeps_cause() {
        let err = CliError::from(resolve(-1, Some("not-a-date"), None).unwrap_err());
        assert_eq!(err.code_str(), "ROLLBACK_CLI_DATE_FORMAT_ERROR");
        assert!(err.message().contains("yyyy-MM-dd'T'HH:mm:ss.SSS"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_engine_message_unchanged() {
        let err = CliError::from(RollbackError::from(EngineError::Failed(
            "Could not find tag v9".to_string(),
        )));
        assert_eq!(err.code(), &CliErrorCode::EngineFailed);
        assert_eq!(err.message(), "Could not find tag v9");
    }

    #[test]
    fn test_launch_failure_names_io_error_once() {
        let err = CliError::from(RollbackError::from(EngineError::Launch {
            command: "liquibase".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        }));
        assert_eq!(err.message(), "failed to launch migration engine 'liquibase'");
        assert!(!err.to_string().contains("No such file"));
        assert_eq!(err.source().unwrap().to_string(), "No such file or directory");
    }
}
