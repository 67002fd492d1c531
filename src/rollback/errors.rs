//! # Rollback Errors
//!
//! Error types for rollback target selection and dispatch.

use thiserror::Error;

use crate::engine::EngineError;

/// Accepted ISO 8601 layouts, in the order they are listed to the user.
pub const ISO_LAYOUTS: [&str; 3] = [
    "yyyy-MM-dd",
    "yyyy-MM-dd'T'HH:mm:ss",
    "yyyy-MM-dd'T'HH:mm:ss.SSS",
];

/// Result type for rollback operations
pub type RollbackResult<T> = Result<T, RollbackError>;

/// Failure of the strict ISO 8601 parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsoParseError {
    /// Input length matches none of the accepted layouts
    #[error("input of length {0} matches no accepted ISO 8601 layout")]
    UnrecognizedLayout(usize),

    /// Input has the right shape but did not parse
    #[error(transparent)]
    Invalid(#[from] chrono::ParseError),
}

/// Rollback errors. All are terminal for the invocation.
#[derive(Debug, Error)]
pub enum RollbackError {
    /// Selector validation failed
    #[error("{0}")]
    Configuration(String),

    /// Rollback date could not be parsed; carries the ISO failure as source
    #[error(
        "Unexpected date/time format.  The format should be one of the following ISO 8601 variants: \"{}\", \"{}\" or \"{}\"",
        ISO_LAYOUTS[0],
        ISO_LAYOUTS[1],
        ISO_LAYOUTS[2]
    )]
    DateFormat {
        value: String,
        #[source]
        source: IsoParseError,
    },

    /// Failure surfaced from the migration engine
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl RollbackError {
    pub fn no_selector() -> Self {
        Self::Configuration(
            "One of the rollback options must be specified, please specify one of \
             rollbackTag, rollbackCount or rollbackDate"
                .to_string(),
        )
    }

    pub fn invalid_count(count: i64) -> Self {
        Self::Configuration(format!(
            "A rollback count of {} is meaningless, please select a value greater than 0",
            count
        ))
    }

    pub fn multiple_selectors() -> Self {
        Self::Configuration(
            "Cannot specify multiple rollbackXXX options, please select only one of \
             rollbackTag, rollbackCount, rollbackDate."
                .to_string(),
        )
    }

    /// The user input that failed to parse, if this error names one
    pub fn rejected_input(&self) -> Option<&str> {
        match self {
            Self::DateFormat { value, .. } => Some(value.as_str()),
            _ => None,
        }
    }

    /// True for input errors raised before any engine call
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Engine(_))
    }
}
