// SPDX-License-Identifier: MIT

//! Shared helpers for date/time parsing and formatting.
//!
//! Streaks and day buckets work over local calendar days, never raw
//! timestamps, so timestamp-to-day reduction lives in one place.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC3339 timestamp, normalized to UTC.
///
/// Returns `None` for anything unparsable; callers treat a bad date as
/// a per-record problem, not a fatal one.
pub fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Reduce an RFC3339 timestamp to the calendar day in its own offset.
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Chart label for a day bucket, e.g. "Jan 5".
pub fn day_label(day: NaiveDate) -> String {
    format!("{} {}", MONTH_ABBREV[day.month0() as usize], day.day())
}

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_day_drops_time_of_day() {
        let day = parse_calendar_day("2024-01-15T23:59:59Z").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_calendar_day_rejects_garbage() {
        assert!(parse_calendar_day("not-a-date").is_none());
        assert!(parse_calendar_day("").is_none());
    }

    #[test]
    fn test_parse_calendar_day_uses_record_offset() {
        // 23:30 at UTC-8 is the next day in UTC; the record's own
        // offset decides which calendar day it belongs to.
        let day = parse_calendar_day("2024-01-15T23:30:00-08:00").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_day_label_no_zero_padding() {
        assert_eq!(
            day_label(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            "Jan 5"
        );
        assert_eq!(
            day_label(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()),
            "Dec 25"
        );
    }
}
