//! Cell formatting for violation rows.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub(crate) fn date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()
}

pub(crate) fn clock(value: Option<NaiveDateTime>) -> String {
    value.map(|dt| dt.format("%H:%M").to_string()).unwrap_or_default()
}

pub(crate) fn time(value: Option<NaiveTime>) -> String {
    value.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

/// A parsed time as `HH:MM`, else the first five characters of the logged text.
pub(crate) fn time_or_logged(value: Option<NaiveTime>, logged: Option<&str>) -> String {
    match value {
        Some(_) => time(value),
        None => logged.unwrap_or_default().chars().take(5).collect(),
    }
}

pub(crate) fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}
