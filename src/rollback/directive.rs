//! Rollback directive and pass-through filters

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::date::format_for_engine;

/// How far back to revert applied change sets.
///
/// Only built by the resolver, so exactly one selector is ever active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum RollbackDirective {
    /// Revert the last `count` change sets
    #[serde(rename = "count")]
    ByCount { count: u32 },
    /// Revert every change set applied after `date`
    #[serde(rename = "date")]
    ByDate {
        #[serde(serialize_with = "serialize_engine_date")]
        date: NaiveDateTime,
    },
    /// Revert every change set applied after `tag`
    #[serde(rename = "tag")]
    ByTag { tag: String },
}

impl RollbackDirective {
    /// Short name of the selector kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ByCount { .. } => "count",
            Self::ByDate { .. } => "date",
            Self::ByTag { .. } => "tag",
        }
    }
}

impl fmt::Display for RollbackDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByCount { count } => write!(f, "last {} change set(s)", count),
            Self::ByDate { date } => write!(f, "date {}", format_for_engine(date)),
            Self::ByTag { tag } => write!(f, "tag '{}'", tag),
        }
    }
}

fn serialize_engine_date<S: serde::Serializer>(
    date: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_for_engine(date))
}

/// Context and label expressions, forwarded to the engine untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextFilter {
    pub contexts: Option<String>,
    pub labels: Option<String>,
}

impl ContextFilter {
    pub fn new(contexts: Option<String>, labels: Option<String>) -> Self {
        Self { contexts, labels }
    }
}
