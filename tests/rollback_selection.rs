//! Rollback Selection Tests
//!
//! Exactly one of count, date and tag selects the rollback target:
//! - Nothing supplied is rejected
//! - A supplied count must be positive
//! - Two or more selectors are rejected
//! - A single selector yields the matching directive carrying its value

use chrono::{Datelike, NaiveDate, Timelike};
use migrate_rollback::rollback::{
    parse_rollback_date, resolve, RollbackDirective, RollbackError, COUNT_NOT_SET, ISO_LAYOUTS,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn is_configuration_error(result: Result<RollbackDirective, RollbackError>) -> bool {
    matches!(result, Err(RollbackError::Configuration(_)))
}

const DATES: [Option<&str>; 2] = [None, Some("2020-01-15")];
const TAGS: [Option<&str>; 2] = [None, Some("release-1.0")];

// =============================================================================
// Selection Tests
// =============================================================================

#[test]
fn test_no_selector_fails() {
    assert!(is_configuration_error(resolve(COUNT_NOT_SET, None, None)));
}

#[test]
fn test_single_selector_succeeds() {
    for count in [1, 5, i32::MAX] {
        assert_eq!(
            resolve(count, None, None).unwrap(),
            RollbackDirective::ByCount {
                count: count as u32
            }
        );
    }

    let date = NaiveDate::from_ymd_opt(2020, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    assert_eq!(
        resolve(COUNT_NOT_SET, Some("2020-01-15T10:30:00"), None).unwrap(),
        RollbackDirective::ByDate { date }
    );

    assert_eq!(
        resolve(COUNT_NOT_SET, None, Some("release-1.0")).unwrap(),
        RollbackDirective::ByTag {
            tag: "release-1.0".to_string()
        }
    );
}

#[test]
fn test_two_or_more_selectors_fail() {
    for count in [COUNT_NOT_SET, 3] {
        for date in DATES {
            for tag in TAGS {
                let supplied =
                    usize::from(count > 0) + usize::from(date.is_some()) + usize::from(tag.is_some());
                if supplied >= 2 {
                    assert!(
                        is_configuration_error(resolve(count, date, tag)),
                        "count={} date={:?} tag={:?}",
                        count,
                        date,
                        tag
                    );
                }
            }
        }
    }
}

#[test]
fn test_non_positive_count_fails_regardless_of_others() {
    for count in [0, -2, -7, i32::MIN] {
        for date in DATES {
            for tag in TAGS {
                assert!(is_configuration_error(resolve(count, date, tag)));
            }
        }
    }
}

#[test]
fn test_end_to_end_examples() {
    assert_eq!(
        resolve(5, None, None).unwrap(),
        RollbackDirective::ByCount { count: 5 }
    );
    assert_eq!(
        resolve(-1, None, Some("release-1.0")).unwrap(),
        RollbackDirective::ByTag {
            tag: "release-1.0".to_string()
        }
    );
}

#[test]
fn test_empty_tag_counts_as_absent() {
    assert!(is_configuration_error(resolve(COUNT_NOT_SET, None, Some(""))));
    assert_eq!(
        resolve(4, None, Some("")).unwrap(),
        RollbackDirective::ByCount { count: 4 }
    );
}

#[test]
fn test_empty_date_counts_as_absent() {
    assert!(is_configuration_error(resolve(COUNT_NOT_SET, Some(""), None)));
    assert_eq!(
        resolve(COUNT_NOT_SET, Some(""), Some("v1")).unwrap(),
        RollbackDirective::ByTag {
            tag: "v1".to_string()
        }
    );
}

#[test]
fn test_resolved_tag_is_never_empty() {
    for date in DATES {
        for tag in [None, Some(""), Some("release-1.0")] {
            if let Ok(RollbackDirective::ByTag { tag }) = resolve(COUNT_NOT_SET, date, tag) {
                assert!(!tag.is_empty());
            }
        }
    }
}

// =============================================================================
// Date Parsing Tests
// =============================================================================

#[test]
fn test_accepted_iso_layouts() {
    let d = parse_rollback_date("2020-01-15").unwrap();
    assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2020, 1, 15, 0));

    let d = parse_rollback_date("2020-01-15T10:30:00").unwrap();
    assert_eq!((d.hour(), d.minute(), d.second()), (10, 30, 0));

    let d = parse_rollback_date("2020-01-15T10:30:00.500").unwrap();
    assert_eq!(d.nanosecond() / 1_000_000, 500);
}

#[test]
fn test_unparseable_date_lists_layouts() {
    let err = parse_rollback_date("not-a-date").unwrap_err();
    assert!(matches!(err, RollbackError::DateFormat { .. }));
    let msg = err.to_string();
    for layout in ISO_LAYOUTS {
        assert!(msg.contains(layout), "{} missing from {}", layout, msg);
    }
}

#[test]
fn test_legacy_date_still_accepted() {
    let d = parse_rollback_date("Jan 15, 2020").unwrap();
    assert_eq!((d.year(), d.month(), d.day()), (2020, 1, 15));
}
