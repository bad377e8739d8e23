//! Day-first date and time parsing.
//!
//! Every parser returns `None` for values it cannot read; an unparsable cell
//! is a missing cell, never an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::input::DataTable;

const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d/%m/%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

fn clean(value: &str) -> Option<&str> {
    if DataTable::is_null_value(value) {
        None
    } else {
        Some(value.trim())
    }
}

fn parse_full_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn parse_date_only(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn parse_time_only(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

/// Parse a calendar date, reading `dd/mm/yyyy` before `yyyy-mm-dd`.
///
/// A full timestamp is accepted and truncated to its date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = clean(value)?;
    parse_date_only(value).or_else(|| parse_full_datetime(value).map(|dt| dt.date()))
}

/// Parse a wall-clock time, accepting a full timestamp as well.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = clean(value)?;
    parse_time_only(value).or_else(|| parse_full_datetime(value).map(|dt| dt.time()))
}

/// Parse a timestamp cell.
///
/// A bare date reads as midnight. A bare time is placed on `anchor`, the
/// record's operation date; without an anchor it is missing.
pub fn parse_timestamp(value: &str, anchor: Option<NaiveDate>) -> Option<NaiveDateTime> {
    let value = clean(value)?;

    if let Some(dt) = parse_full_datetime(value) {
        return Some(dt);
    }
    if let Some(date) = parse_date_only(value) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    let time = parse_time_only(value)?;
    anchor.map(|date| date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_first() {
        assert_eq!(parse_date("01/03/2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_date("15-01-2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024-03-01"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_date("01/03/2024 23:59"), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn test_unparsable_is_missing() {
        assert_eq!(parse_date("31/02/2024"), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_timestamp("NaT", None), None);
        assert_eq!(parse_time("25:00"), None);
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = ymd(2024, 3, 1).and_hms_opt(10, 5, 0).unwrap();
        assert_eq!(parse_timestamp("01/03/2024 10:05", None), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 10:05:00", None), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:05:00.000", None), Some(expected));
    }

    #[test]
    fn test_time_only_uses_anchor() {
        let anchor = ymd(2024, 3, 1);
        assert_eq!(
            parse_timestamp("10:05", Some(anchor)),
            Some(anchor.and_hms_opt(10, 5, 0).unwrap())
        );
        assert_eq!(parse_timestamp("10:05", None), None);
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(
            parse_timestamp("01/03/2024", None),
            Some(ymd(2024, 3, 1).and_time(NaiveTime::MIN))
        );
    }

    #[test]
    fn test_parse_time_variants() {
        let t = NaiveTime::from_hms_opt(7, 30, 0).unwrap();
        assert_eq!(parse_time("07:30"), Some(t));
        assert_eq!(parse_time("07:30:00"), Some(t));
        assert_eq!(parse_time("2024-03-01 07:30:00"), Some(t));
    }
}
