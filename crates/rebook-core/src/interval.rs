use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::{parse_extra_days, TimeOfDay};

/// Time-of-day window applied to every occurrence date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntervalWindow {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub extra_days: u32,
}

/// Concrete start and end instant of one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn is_same_day(&self) -> bool {
        self.start.date() == self.end.date()
    }
}

impl IntervalWindow {
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay, extra_days: u32) -> Self {
        Self { start_time, end_time, extra_days }
    }

    /// Builds a window from raw field values. Missing times mean midnight and
    /// the extra-days offset never goes below zero.
    pub fn from_fields(
        start_time: Option<&str>,
        end_time: Option<&str>,
        extra_days: Option<&str>,
    ) -> Self {
        Self {
            start_time: TimeOfDay::from_field(start_time),
            end_time: TimeOfDay::from_field(end_time),
            extra_days: extra_days.map(parse_extra_days).unwrap_or(0),
        }
    }

    /// True when the end time lies before the start time on the clock.
    pub fn wraps_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Day offset of the end instant. A midnight wrap adds one day on top of
    /// the configured extra days.
    pub fn effective_extra_days(&self) -> u32 {
        self.extra_days.saturating_add(u32::from(self.wraps_midnight()))
    }

    /// Combines the window with an occurrence date. Returns `None` only when
    /// the end instant falls outside chrono's representable range.
    pub fn apply(&self, date: NaiveDate) -> Option<Interval> {
        let start = date.and_time(to_naive_time(self.start_time)?);
        let offset = Duration::try_hours(i64::from(self.effective_extra_days()) * 24)?;
        let end = date
            .and_time(to_naive_time(self.end_time)?)
            .checked_add_signed(offset)?;
        Some(Interval { start, end })
    }
}

fn to_naive_time(time: TimeOfDay) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(time.hour, time.minute, 0)
}
