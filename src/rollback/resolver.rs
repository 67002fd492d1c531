//! Rollback target selection
//!
//! Exactly one of count, date and tag must be supplied. Checks run in a fixed
//! order so the reported message is stable:
//! 1. nothing supplied
//! 2. count supplied but not positive
//! 3. more than one selector supplied (checked count, then date, then tag)
//!
//! An empty date or tag counts as not supplied.

use serde::{Deserialize, Serialize};

use super::date::parse_rollback_date;
use super::directive::RollbackDirective;
use super::errors::{RollbackError, RollbackResult};

/// Sentinel meaning "no rollback count given".
pub const COUNT_NOT_SET: i32 = -1;

/// Raw selectors as supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackRequest {
    pub count: i32,
    pub date: Option<String>,
    pub tag: Option<String>,
}

impl Default for RollbackRequest {
    fn default() -> Self {
        Self {
            count: COUNT_NOT_SET,
            date: None,
            tag: None,
        }
    }
}

impl RollbackRequest {
    pub fn by_count(count: i32) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn by_date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Validate the selectors and build the directive.
    pub fn resolve(&self) -> RollbackResult<RollbackDirective> {
        resolve(self.count, self.date.as_deref(), self.tag.as_deref())
    }
}

/// Validate the three selectors and build the matching directive.
///
/// A date selector is parsed here, so a malformed date never reaches the
/// engine.
pub fn resolve(count: i32, date: Option<&str>, tag: Option<&str>) -> RollbackResult<RollbackDirective> {
    let date = date.filter(|d| !d.is_empty());
    let tag = tag.filter(|t| !t.is_empty());

    if count == COUNT_NOT_SET && date.is_none() && tag.is_none() {
        return Err(RollbackError::no_selector());
    }

    if count != COUNT_NOT_SET && count <= 0 {
        return Err(RollbackError::invalid_count(count.into()));
    }

    let by_count = count > 0;

    if by_count {
        if date.is_some() || tag.is_some() {
            return Err(RollbackError::multiple_selectors());
        }
        return Ok(RollbackDirective::ByCount {
            count: count.unsigned_abs(),
        });
    }

    if let Some(date) = date {
        if tag.is_some() {
            return Err(RollbackError::multiple_selectors());
        }
        return Ok(RollbackDirective::ByDate {
            date: parse_rollback_date(date)?,
        });
    }

    match tag {
        Some(tag) => Ok(RollbackDirective::ByTag {
            tag: tag.to_string(),
        }),
        None => Err(RollbackError::no_selector()),
    }
}
