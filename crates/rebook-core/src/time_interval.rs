//! Single booking interval, as entered in the start/end widget.
//!
//! The widget works in one of three modes: whole days, a fixed duration
//! from a start time, or explicit start and end date/time. Each mode yields
//! a display text and the two stored instants.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::format::{format_date, format_datetime, format_interval, format_time};
use crate::interval::Interval;
use crate::models::{parse_date_str, TimeOfDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeMode {
    FullDays,
    UseDuration { minutes: u32 },
    TimeAndDate,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid time mode: {0}")]
pub struct ParseTimeModeError(String);

impl TimeMode {
    /// Maps a selector value; `use_duration` takes its length from the page.
    pub fn from_field(value: &str, duration_minutes: u32) -> Result<Self, ParseTimeModeError> {
        match value.parse::<TimeModeKind>()? {
            TimeModeKind::FullDays => Ok(TimeMode::FullDays),
            TimeModeKind::UseDuration => Ok(TimeMode::UseDuration { minutes: duration_minutes }),
            TimeModeKind::TimeAndDate => Ok(TimeMode::TimeAndDate),
        }
    }

    /// Whether the mode carries a time of day, which is what the form's
    /// specific-time flag records.
    pub fn is_specific_time(&self) -> bool {
        !matches!(self, TimeMode::FullDays)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeModeKind {
    FullDays,
    UseDuration,
    TimeAndDate,
}

impl FromStr for TimeModeKind {
    type Err = ParseTimeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "full_days" => Ok(TimeModeKind::FullDays),
            "use_duration" => Ok(TimeModeKind::UseDuration),
            "time_and_date" => Ok(TimeModeKind::TimeAndDate),
            _ => Err(ParseTimeModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeIntervalInputs {
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeIntervalOutcome {
    pub mode: TimeMode,
    pub display: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub specific_time: bool,
}

/// Values shown in the date and clock pickers after an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetFields {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
}

impl TimeIntervalOutcome {
    /// Stored form of the start instant, `DD.MM.YYYY HH:MM:SS`.
    pub fn stored_start(&self) -> String {
        format_stored(self.start)
    }

    pub fn stored_end(&self) -> String {
        format_stored(self.end)
    }

    /// Picker values. Whole-day bookings store midnight after the last day,
    /// so the end picker shows the day before.
    pub fn widget_fields(&self) -> WidgetFields {
        let mut end = self.end;
        if self.mode == TimeMode::FullDays && self.start.date() != end.date() {
            end -= Duration::days(1);
        }
        WidgetFields {
            start_date: format_date(self.start.date()),
            start_time: format_time(self.start),
            end_date: format_date(end.date()),
            end_time: format_time(end),
        }
    }
}

fn format_stored(dt: NaiveDateTime) -> String {
    dt.format("%d.%m.%Y %H:%M:00").to_string()
}

/// Computes the interval for the given mode. Returns `None` while no start
/// date is selected.
pub fn describe(mode: TimeMode, inputs: &TimeIntervalInputs) -> Option<TimeIntervalOutcome> {
    let start_date = read_date(inputs.start_date.as_deref())?;
    // A missing end date falls back to the start day.
    let end_date = read_date(inputs.end_date.as_deref()).unwrap_or(start_date);

    let (display, start, end) = match mode {
        TimeMode::FullDays => {
            let display = if start_date != end_date {
                format!("{} - {}", format_date(start_date), format_date(end_date))
            } else {
                format_date(start_date)
            };
            let start = start_date.and_time(NaiveTime::MIN);
            let end = end_date.succ_opt()?.and_time(NaiveTime::MIN);
            (display, start, end)
        }
        TimeMode::UseDuration { minutes } => {
            let start = at(start_date, inputs.start_time.as_deref())?;
            let end = start.checked_add_signed(Duration::minutes(i64::from(minutes)))?;
            (format!("{} - {}", format_datetime(start), format_time(end)), start, end)
        }
        TimeMode::TimeAndDate => {
            let start = at(start_date, inputs.start_time.as_deref())?;
            let end = at(end_date, inputs.end_time.as_deref())?;
            (format_interval(&Interval { start, end }), start, end)
        }
    };

    Some(TimeIntervalOutcome {
        mode,
        display,
        start,
        end,
        specific_time: mode.is_specific_time(),
    })
}

fn read_date(value: Option<&str>) -> Option<NaiveDate> {
    value.filter(|v| !v.trim().is_empty()).and_then(|v| parse_date_str(v).ok())
}

fn at(date: NaiveDate, time: Option<&str>) -> Option<NaiveDateTime> {
    let time = TimeOfDay::from_field(time);
    Some(date.and_time(NaiveTime::from_hms_opt(time.hour, time.minute, 0)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(
        start_date: &str,
        start_time: &str,
        end_date: &str,
        end_time: &str,
    ) -> TimeIntervalInputs {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        TimeIntervalInputs {
            start_date: opt(start_date),
            start_time: opt(start_time),
            end_date: opt(end_date),
            end_time: opt(end_time),
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(TimeMode::from_field("full_days", 0).unwrap(), TimeMode::FullDays);
        assert_eq!(
            TimeMode::from_field("use-duration", 45).unwrap(),
            TimeMode::UseDuration { minutes: 45 }
        );
        assert!(TimeMode::from_field("hourly", 0).is_err());
    }

    #[test]
    fn test_no_start_date() {
        assert!(describe(TimeMode::TimeAndDate, &inputs("", "10:00", "", "")).is_none());
    }

    mod full_days {
        use super::*;

        #[test]
        fn test_single_day() {
            let fields = inputs("05.03.2024", "", "05.03.2024", "");
            let outcome = describe(TimeMode::FullDays, &fields).unwrap();
            assert_eq!(outcome.display, "05.03.2024");
            assert_eq!(outcome.stored_start(), "05.03.2024 00:00:00");
            assert_eq!(outcome.stored_end(), "06.03.2024 00:00:00");
            assert!(!outcome.specific_time);
            assert_eq!(outcome.widget_fields().end_date, "05.03.2024");
        }

        #[test]
        fn test_range() {
            let fields = inputs("05.03.2024", "", "07.03.2024", "");
            let outcome = describe(TimeMode::FullDays, &fields).unwrap();
            assert_eq!(outcome.display, "05.03.2024 - 07.03.2024");
            assert_eq!(outcome.stored_end(), "08.03.2024 00:00:00");
            assert_eq!(outcome.widget_fields().end_date, "07.03.2024");
        }
    }

    #[test]
    fn test_use_duration() {
        let mode = TimeMode::UseDuration { minutes: 90 };
        let outcome = describe(mode, &inputs("05.03.2024", "23:00", "", "")).unwrap();
        assert_eq!(outcome.display, "05.03.2024 23:00 - 00:30");
        assert_eq!(outcome.stored_end(), "06.03.2024 00:30:00");
        assert!(outcome.specific_time);
    }

    #[test]
    fn test_time_and_date() {
        let fields = inputs("05.03.2024", "09:00", "05.03.2024", "11:30");
        let same = describe(TimeMode::TimeAndDate, &fields).unwrap();
        assert_eq!(same.display, "05.03.2024 09:00 - 11:30");

        let fields = inputs("05.03.2024", "09:00", "06.03.2024", "11:30");
        let spanning = describe(TimeMode::TimeAndDate, &fields).unwrap();
        assert_eq!(spanning.display, "05.03.2024 09:00 - 06.03.2024 11:30");
        assert_eq!(spanning.widget_fields().end_time, "11:30");
    }
}
