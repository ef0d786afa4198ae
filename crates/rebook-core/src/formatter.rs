use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::format::{format_date, format_interval};
use crate::interval::{Interval, IntervalWindow};
use crate::models::{
    parse_count, parse_date_str, Frequency, RecurrenceSpec, SelectedDate, WeekdaySet,
};
use crate::recurrence::{RecurrenceEngine, DEFAULT_MAX_OCCURRENCES};

/// Raw values of the recurrence form fields, exactly as typed or picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInputs {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub count: Option<String>,
    pub frequency: Option<String>,
    /// Names of the checked weekday boxes (`RRule.MO`, ...).
    pub weekdays: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub extra_days: Option<String>,
    pub specific_time: bool,
}

impl Default for FormInputs {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            count: None,
            frequency: None,
            weekdays: Vec::new(),
            start_time: None,
            end_time: None,
            extra_days: None,
            specific_time: true,
        }
    }
}

/// Settings shared by every recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatterConfig {
    /// Upper bound on the number of rendered occurrences
    pub max_occurrences: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self { max_occurrences: DEFAULT_MAX_OCCURRENCES }
    }
}

/// RecurrenceIntervalFormatter: turns form inputs into displayable intervals.
///
/// Responsibilities:
/// 1. Parse the raw field values into a [`RecurrenceSpec`] and [`IntervalWindow`]
/// 2. Ask the engine for occurrence dates, but only for finite series
/// 3. Apply the time window to every date and format the result
///
/// Parse and engine failures never surface as errors; they produce an empty
/// list, the same as a form that has not been filled in yet.
#[derive(Debug, Clone)]
pub struct RecurrenceIntervalFormatter<E> {
    engine: E,
    config: FormatterConfig,
}

impl<E: RecurrenceEngine> RecurrenceIntervalFormatter<E> {
    pub fn new(engine: E, config: FormatterConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Builds the recurrence spec, or `None` while the start date is missing
    /// or unreadable. An unreadable end date counts as absent.
    pub fn build_spec(&self, inputs: &FormInputs) -> Option<RecurrenceSpec> {
        let start_date = non_empty(inputs.start_date.as_deref())?;
        let start_date = match parse_date_str(start_date) {
            Ok(date) => date,
            Err(e) => {
                debug!(error = %e, "Ignoring unreadable start date");
                return None;
            }
        };

        let end_date = non_empty(inputs.end_date.as_deref()).and_then(|v| parse_date_str(v).ok());
        let count = inputs.count.as_deref().and_then(parse_count);

        Some(
            RecurrenceSpec::new(start_date)
                .with_frequency(Frequency::from_field(inputs.frequency.as_deref()))
                .with_weekdays(WeekdaySet::from_names(&inputs.weekdays))
                .with_termination(end_date, count),
        )
    }

    pub fn build_window(&self, inputs: &FormInputs) -> IntervalWindow {
        IntervalWindow::from_fields(
            inputs.start_time.as_deref(),
            inputs.end_time.as_deref(),
            inputs.extra_days.as_deref(),
        )
    }

    /// Computes the concrete intervals in engine order.
    pub fn intervals(&self, inputs: &FormInputs) -> Vec<Interval> {
        let Some(spec) = self.build_spec(inputs) else {
            return Vec::new();
        };

        // An open ended series would never stop expanding.
        if !spec.is_terminated() {
            debug!("Recurrence has neither end date nor count, nothing to expand");
            return Vec::new();
        }

        let dates = match self.engine.occurrences(&spec) {
            Ok(dates) => dates,
            Err(e) => {
                warn!(error = %e, "Recurrence engine rejected the form inputs");
                return Vec::new();
            }
        };

        let window = self.build_window(inputs);
        dates
            .into_iter()
            .take(self.config.max_occurrences)
            .filter_map(|date| {
                let interval = window.apply(date);
                if interval.is_none() {
                    debug!(
                        %date,
                        extra_days = window.extra_days,
                        "Dropping occurrence with unrepresentable end"
                    );
                }
                interval
            })
            .collect()
    }

    /// Recomputes the full list of selected dates.
    pub fn recompute(&self, inputs: &FormInputs) -> Vec<SelectedDate> {
        let selected: Vec<SelectedDate> = self
            .intervals(inputs)
            .iter()
            .map(|interval| {
                if inputs.specific_time {
                    format_interval(interval)
                } else {
                    format_date(interval.start.date())
                }
            })
            .map(SelectedDate::new)
            .collect();

        debug!(occurrences = selected.len(), "Recomputed selected dates");
        selected
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
