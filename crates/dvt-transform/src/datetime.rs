//! Day-first date parsing.
//!
//! Ambiguous numeric dates such as `10/01/2024` resolve day-first
//! (10 January 2024); the month-first reading is only tried when the
//! day-first one is impossible (`01/31/2024`).

use chrono::{NaiveDate, NaiveDateTime};

/// Datetime layouts, tried before the date-only ones. Only the date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",  // 15/01/2024
    "%d-%m-%Y",  // 15-01-2024
    "%d.%m.%Y",  // 15.01.2024
    "%m/%d/%Y",  // 01/31/2024, only when day-first fails
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%Y-%b-%d",  // 2024-Jan-15
];

/// Parse a date, preferring day-first readings.
///
/// Returns `None` for empty or unrecognized text.
pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_iso8601_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_first_wins_when_ambiguous() {
        assert_eq!(parse_day_first("10/01/2024"), Some(ymd(2024, 1, 10)));
        assert_eq!(parse_day_first("01/31/2024"), Some(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_iso_and_named_months() {
        assert_eq!(parse_day_first("2024-03-05"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_day_first("2024-03-05 13:45:00"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_day_first("15-Jan-2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_day_first("January 15, 2024"), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_rejects_non_dates() {
        assert_eq!(parse_day_first(""), None);
        assert_eq!(parse_day_first("north"), None);
        assert_eq!(parse_day_first("42"), None);
    }

    #[test]
    fn test_format_iso8601_date() {
        assert_eq!(format_iso8601_date(ymd(2024, 1, 5)), "2024-01-05");
    }
}
