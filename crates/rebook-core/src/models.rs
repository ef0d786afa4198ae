use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::CoreError;

/// Parses a locale formatted calendar date.
///
/// Components may be separated by `.`, `/` or `-`. When the first component
/// has four digits the string is read as year-month-day, otherwise as
/// day-month-year (`15.01.2024`).
pub fn parse_date_str(value: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    let parts: Vec<&str> = trimmed.split(['.', '/', '-']).map(str::trim).collect();

    let numeric = |p: &&str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    if parts.len() != 3 || !parts.iter().all(numeric) {
        return Err(CoreError::InvalidDate(value.to_string()));
    }

    let (year, month, day) = if parts[0].len() == 4 {
        (parts[0], parts[1], parts[2])
    } else {
        (parts[2], parts[1], parts[0])
    };

    let invalid = || CoreError::InvalidDate(value.to_string());
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Parses an occurrence count. Only plain digit strings are accepted.
pub fn parse_count(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Parses the extra-days offset from its leading integer, so `"1.5"` reads
/// as 1. Negative and unreadable values clamp to zero.
pub fn parse_extra_days(value: &str) -> u32 {
    let trimmed = value.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if unsigned.starts_with('-') {
        return 0;
    }

    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Hour and minute of a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, CoreError> {
        if hour > 23 || minute > 59 {
            return Err(CoreError::InvalidTime(format!("{hour}:{minute}")));
        }
        Ok(Self { hour, minute })
    }

    /// Parses an optional field value, falling back to midnight.
    pub fn from_field(value: Option<&str>) -> Self {
        value
            .filter(|v| !v.trim().is_empty())
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidTime(s.to_string());
        let parts: Vec<&str> = s.trim().split(':').collect();

        // A trailing seconds component is tolerated and dropped.
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }
        let number = |p: &str| -> Result<u32, CoreError> {
            if p.is_empty() || p.len() > 2 || !p.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            p.parse().map_err(|_| invalid())
        };

        let hour = number(parts[0])?;
        let minute = number(parts[1])?;
        if let Some(seconds) = parts.get(2).copied() {
            number(seconds)?;
        }
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Frequency unit understood by the recurrence engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineUnit {
    Weekly,
    Monthly,
    Yearly,
}

impl EngineUnit {
    pub fn as_rrule(&self) -> &'static str {
        match self {
            EngineUnit::Weekly => "WEEKLY",
            EngineUnit::Monthly => "MONTHLY",
            EngineUnit::Yearly => "YEARLY",
        }
    }
}

/// Repetition choices offered by the booking form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Weekly,
    Monthly,
    Trimonthly,
    Halfyearly,
    Yearly,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid frequency: {0}")]
pub struct ParseFrequencyError(String);

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Trimonthly,
        Frequency::Halfyearly,
        Frequency::Yearly,
    ];

    /// Maps a selector value, defaulting to weekly for anything unknown.
    pub fn from_field(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub fn engine_unit(&self) -> EngineUnit {
        match self {
            Frequency::Weekly => EngineUnit::Weekly,
            Frequency::Monthly | Frequency::Trimonthly | Frequency::Halfyearly => {
                EngineUnit::Monthly
            }
            Frequency::Yearly => EngineUnit::Yearly,
        }
    }

    pub fn interval(&self) -> u16 {
        match self {
            Frequency::Trimonthly => 3,
            Frequency::Halfyearly => 6,
            _ => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Trimonthly => "trimonthly",
            Frequency::Halfyearly => "halfyearly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            // Older templates post the misspelled value.
            "monthly" | "montly" => Ok(Frequency::Monthly),
            "trimonthly" => Ok(Frequency::Trimonthly),
            "halfyearly" => Ok(Frequency::Halfyearly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a weekday checkbox name such as `RRule.MO`, `we`, `thu` or `Friday`.
pub fn parse_weekday_name(name: &str) -> Option<Weekday> {
    let lowered = name.trim().to_lowercase();
    let short = lowered.strip_prefix("rrule.").unwrap_or(&lowered);
    match short {
        "mo" | "mon" | "monday" => Some(Weekday::Mon),
        "tu" | "tue" | "tuesday" => Some(Weekday::Tue),
        "we" | "wed" | "wednesday" => Some(Weekday::Wed),
        "th" | "thu" | "thursday" => Some(Weekday::Thu),
        "fr" | "fri" | "friday" => Some(Weekday::Fri),
        "sa" | "sat" | "saturday" => Some(Weekday::Sat),
        "su" | "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Two letter RFC 5545 code for a weekday.
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Set of selected weekdays, iterated Monday first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn new() -> Self {
        Self(0)
    }

    /// Builds a set from checkbox names; unknown names are skipped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|n| parse_weekday_name(n.as_ref()))
            .collect()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut set = WeekdaySet::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Everything the recurrence engine needs to enumerate occurrence dates.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceSpec {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub occurrence_count: Option<u32>,
    pub frequency: Frequency,
    pub weekdays: WeekdaySet,
    pub week_start: Weekday,
}

impl RecurrenceSpec {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            occurrence_count: None,
            frequency: Frequency::Weekly,
            weekdays: WeekdaySet::new(),
            week_start: Weekday::Mon,
        }
    }

    /// Sets the termination condition. An end date wins over a count.
    pub fn with_termination(mut self, end_date: Option<NaiveDate>, count: Option<u32>) -> Self {
        self.end_date = end_date;
        self.occurrence_count = if end_date.is_some() { None } else { count };
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.weekdays = weekdays;
        self
    }

    /// True when the series is finite and may be enumerated.
    pub fn is_terminated(&self) -> bool {
        self.end_date.is_some() || self.occurrence_count.is_some()
    }

    /// Renders the recurrence as `DTSTART`/`RRULE` lines. Dates are anchored at
    /// midnight UTC so that the end date is included.
    pub fn to_rrule_string(&self) -> String {
        let mut rule = format!(
            "FREQ={};INTERVAL={};WKST={}",
            self.frequency.engine_unit().as_rrule(),
            self.frequency.interval(),
            weekday_code(self.week_start),
        );

        if let Some(end_date) = self.end_date {
            rule.push_str(&format!(";UNTIL={}T000000Z", end_date.format("%Y%m%d")));
        } else if let Some(count) = self.occurrence_count {
            rule.push_str(&format!(";COUNT={count}"));
        }

        if !self.weekdays.is_empty() {
            let days: Vec<&str> = self.weekdays.iter().map(weekday_code).collect();
            rule.push_str(&format!(";BYDAY={}", days.join(",")));
        }

        format!("DTSTART:{}T000000Z\nRRULE:{}", self.start_date.format("%Y%m%d"), rule)
    }
}

/// A generated interval as it is posted back with the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDate {
    /// Value of the hidden `selecteddate` input.
    pub value: String,
    /// Visible text of the list item.
    pub label: String,
}

impl SelectedDate {
    pub fn new(formatted: String) -> Self {
        Self { value: formatted.clone(), label: formatted }
    }
}
