use chrono::NaiveDate;
use rrule::RRuleSet;
use tracing::debug;

use crate::error::CoreError;
use crate::models::RecurrenceSpec;

/// Default cap on the number of dates a single expansion may produce.
pub const DEFAULT_MAX_OCCURRENCES: usize = 500;

/// Enumerates the calendar dates matched by a recurrence spec.
///
/// Implementations return a finite, ascending list. Callers only hand over
/// terminated specs (an end date or a count), see
/// [`RecurrenceSpec::is_terminated`].
pub trait RecurrenceEngine {
    fn occurrences(&self, spec: &RecurrenceSpec) -> Result<Vec<NaiveDate>, CoreError>;
}

impl<E: RecurrenceEngine + ?Sized> RecurrenceEngine for &E {
    fn occurrences(&self, spec: &RecurrenceSpec) -> Result<Vec<NaiveDate>, CoreError> {
        (**self).occurrences(spec)
    }
}

impl<E: RecurrenceEngine + ?Sized> RecurrenceEngine for Box<E> {
    fn occurrences(&self, spec: &RecurrenceSpec) -> Result<Vec<NaiveDate>, CoreError> {
        (**self).occurrences(spec)
    }
}

/// RRuleEngine: expands specs with the `rrule` crate.
///
/// The recurrence is rendered to RFC 5545 text and parsed into an [`RRuleSet`],
/// which keeps every expansion on the same code path the crate validates.
#[derive(Debug, Clone)]
pub struct RRuleEngine {
    max_occurrences: usize,
}

impl Default for RRuleEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OCCURRENCES)
    }
}

impl RRuleEngine {
    pub fn new(max_occurrences: usize) -> Self {
        Self { max_occurrences }
    }

    /// Parses the recurrence into an rrule set without expanding it.
    pub fn build(spec: &RecurrenceSpec) -> Result<RRuleSet, CoreError> {
        let rrule_string = spec.to_rrule_string();
        rrule_string
            .parse::<RRuleSet>()
            .map_err(|e| {
                CoreError::InvalidRRule(format!("Failed to parse RRULE '{}': {}", rrule_string, e))
            })
    }
}

impl RecurrenceEngine for RRuleEngine {
    fn occurrences(&self, spec: &RecurrenceSpec) -> Result<Vec<NaiveDate>, CoreError> {
        if !spec.is_terminated() {
            return Err(CoreError::InvalidInput(
                "Refusing to expand a recurrence without end date or count".to_string(),
            ));
        }

        // rrule rejects these outright; an empty window has no occurrences.
        if spec.occurrence_count == Some(0) {
            return Ok(Vec::new());
        }
        if matches!(spec.end_date, Some(end) if end < spec.start_date) {
            return Ok(Vec::new());
        }

        let rrule_set = Self::build(spec)?;
        let dates: Vec<NaiveDate> = rrule_set
            .into_iter()
            .take(self.max_occurrences)
            .map(|dt| dt.date_naive())
            .collect();

        debug!(count = dates.len(), rule = %spec.to_rrule_string(), "Expanded recurrence");
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, WeekdaySet};
    use chrono::{Datelike, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod rrule_engine_tests {
        use super::*;

        #[test]
        fn test_weekly_count() {
            let spec = RecurrenceSpec::new(date(2024, 1, 1)).with_termination(None, Some(3));
            let dates = RRuleEngine::default().occurrences(&spec).unwrap();
            assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]);
        }

        #[test]
        fn test_until_is_inclusive() {
            let spec = RecurrenceSpec::new(date(2024, 1, 1))
                .with_termination(Some(date(2024, 1, 15)), None);
            let dates = RRuleEngine::default().occurrences(&spec).unwrap();
            assert_eq!(dates.last(), Some(&date(2024, 1, 15)));
            assert_eq!(dates.len(), 3);
        }

        #[test]
        fn test_trimonthly() {
            let spec = RecurrenceSpec::new(date(2024, 1, 10))
                .with_frequency(Frequency::Trimonthly)
                .with_termination(None, Some(3));
            let dates = RRuleEngine::default().occurrences(&spec).unwrap();
            assert_eq!(dates, vec![date(2024, 1, 10), date(2024, 4, 10), date(2024, 7, 10)]);
        }

        #[test]
        fn test_weekday_filter() {
            let spec = RecurrenceSpec::new(date(2024, 1, 1))
                .with_weekdays(WeekdaySet::from_names(["MO", "WE"]))
                .with_termination(None, Some(6));
            let dates = RRuleEngine::default().occurrences(&spec).unwrap();
            assert_eq!(dates.len(), 6);
            assert!(dates.iter().all(|d| matches!(d.weekday(), Weekday::Mon | Weekday::Wed)));
            assert_eq!(dates[1], date(2024, 1, 3));
        }

        #[test]
        fn test_end_before_start_is_empty() {
            let spec = RecurrenceSpec::new(date(2024, 1, 10))
                .with_termination(Some(date(2024, 1, 1)), None);
            assert!(RRuleEngine::default().occurrences(&spec).unwrap().is_empty());
        }

        #[test]
        fn test_zero_count_is_empty() {
            let spec = RecurrenceSpec::new(date(2024, 1, 10)).with_termination(None, Some(0));
            assert!(RRuleEngine::default().occurrences(&spec).unwrap().is_empty());
        }

        #[test]
        fn test_unterminated_is_rejected() {
            let spec = RecurrenceSpec::new(date(2024, 1, 10));
            let result = RRuleEngine::default().occurrences(&spec);
            assert!(matches!(result.unwrap_err(), CoreError::InvalidInput(_)));
        }

        #[test]
        fn test_max_occurrences_caps_expansion() {
            let spec = RecurrenceSpec::new(date(2024, 1, 1)).with_termination(None, Some(50));
            let dates = RRuleEngine::new(5).occurrences(&spec).unwrap();
            assert_eq!(dates.len(), 5);
        }

        #[test]
        fn test_build_parses_rule() {
            let spec = RecurrenceSpec::new(date(2024, 1, 1))
                .with_frequency(Frequency::Yearly)
                .with_termination(None, Some(2));
            assert!(RRuleEngine::build(&spec).is_ok());
        }
    }
}
