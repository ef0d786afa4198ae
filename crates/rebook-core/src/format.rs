//! Display formatting for generated dates and intervals.
//!
//! All strings use the day-first layout of the booking pages
//! (`DD.MM.YYYY HH:MM`).

use chrono::{NaiveDate, NaiveDateTime};

use crate::interval::Interval;

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_time(dt: NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}

/// `DD.MM.YYYY HH:MM` for an instant.
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%d.%m.%Y %H:%M").to_string()
}

/// Formats an interval, omitting the end date when both ends share a day.
pub fn format_interval(interval: &Interval) -> String {
    if interval.is_same_day() {
        format!("{} - {}", format_datetime(interval.start), format_time(interval.end))
    } else {
        format!("{} - {}", format_datetime(interval.start), format_datetime(interval.end))
    }
}
