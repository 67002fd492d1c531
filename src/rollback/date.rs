//! Rollback date parsing
//!
//! Strict ISO 8601 first, selected by input length:
//! - `yyyy-MM-dd` (midnight)
//! - `yyyy-MM-dd'T'HH:mm:ss`
//! - `yyyy-MM-dd'T'HH:mm:ss.SSS`
//!
//! Then the legacy en-US default date styles (`Jan 15, 2020`, `1/15/20`).
//!
//! Timestamps are wall-clock `NaiveDateTime` values. No timezone is applied
//! here; the engine interprets them in its own local timezone.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::errors::{IsoParseError, RollbackError, RollbackResult};

const ISO_DATE: &str = "%Y-%m-%d";
const ISO_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S";
const ISO_DATE_TIME_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Legacy layouts: medium then short en-US date style.
const LEGACY_DATE_LAYOUTS: [&str; 2] = ["%b %d, %Y", "%m/%d/%y"];

/// Layout used when handing a timestamp to the engine.
/// Fractional seconds are only printed when non-zero.
pub const ENGINE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a user supplied rollback date.
///
/// On failure the ISO error is kept as the source; the legacy error is dropped.
pub fn parse_rollback_date(s: &str) -> RollbackResult<NaiveDateTime> {
    match parse_iso(s) {
        Ok(t) => Ok(t),
        Err(iso_err) => parse_legacy(s).ok_or_else(|| RollbackError::DateFormat {
            value: s.to_string(),
            source: iso_err,
        }),
    }
}

/// Strict ISO 8601 parse over the three accepted layouts.
pub fn parse_iso(s: &str) -> Result<NaiveDateTime, IsoParseError> {
    match s.len() {
        10 => Ok(NaiveDate::parse_from_str(s, ISO_DATE)?.and_time(NaiveTime::MIN)),
        19 => Ok(NaiveDateTime::parse_from_str(s, ISO_DATE_TIME)?),
        23 => Ok(NaiveDateTime::parse_from_str(s, ISO_DATE_TIME_MILLIS)?),
        n => Err(IsoParseError::UnrecognizedLayout(n)),
    }
}

fn parse_legacy(s: &str) -> Option<NaiveDateTime> {
    LEGACY_DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(s.trim(), layout).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Format a timestamp for the engine command line.
pub fn format_for_engine(t: &NaiveDateTime) -> String {
    t.format(ENGINE_DATE_FORMAT).to_string()
}
