//! Field state and event bindings for the recurrence form.
//!
//! [`RecurrenceForm`] owns the raw field values and a list of
//! `(field, event)` bindings. Dispatching a bound event recomputes the
//! selected dates and replaces the rendered [`DateList`] wholesale.

use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use crate::formatter::{FormInputs, RecurrenceIntervalFormatter};
use crate::models::{parse_weekday_name, weekday_code, SelectedDate, ALL_WEEKDAYS};
use crate::recurrence::RecurrenceEngine;

/// Name of the hidden input carrying each generated interval.
pub const SELECTED_DATE_FIELD: &str = "selecteddate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StartDate,
    EndDate,
    Count,
    Frequency,
    Weekday(Weekday),
    StartTime,
    EndTime,
    ExtraDays,
    SpecificTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormEvent {
    /// The date picker was closed
    PickerClosed,
    Changed,
    KeyUp,
    /// The clock picker confirmed a time
    TimePicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub field: Field,
    pub event: FormEvent,
}

impl Binding {
    pub const fn new(field: Field, event: FormEvent) -> Self {
        Self { field, event }
    }
}

/// Ordered list of rendered intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateList {
    pub items: Vec<SelectedDate>,
}

impl DateList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }

    /// Renders `<li>` items with a hidden input and visible label each.
    pub fn to_html(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                format!(
                    "<li><input type=\"hidden\" name=\"{}\" value=\"{}\" />{}</li>",
                    SELECTED_DATE_FIELD,
                    escape_html(&item.value),
                    escape_html(&item.label)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// RecurrenceForm: field values, trigger bindings and the rendered list.
pub struct RecurrenceForm<E> {
    formatter: RecurrenceIntervalFormatter<E>,
    inputs: FormInputs,
    bindings: Vec<Binding>,
    rendered: DateList,
}

impl<E: RecurrenceEngine> RecurrenceForm<E> {
    /// Creates the form with the default bindings and renders it once.
    pub fn new(formatter: RecurrenceIntervalFormatter<E>) -> Self {
        Self::with_inputs(formatter, FormInputs::default())
    }

    pub fn with_inputs(formatter: RecurrenceIntervalFormatter<E>, inputs: FormInputs) -> Self {
        let mut form = Self {
            formatter,
            inputs,
            bindings: Self::default_bindings(),
            rendered: DateList::default(),
        };
        form.recompute();
        form
    }

    /// Every `(field, event)` pair that triggers a recompute.
    pub fn default_bindings() -> Vec<Binding> {
        let mut bindings = vec![
            Binding::new(Field::StartDate, FormEvent::PickerClosed),
            Binding::new(Field::EndDate, FormEvent::PickerClosed),
        ];
        bindings.extend(
            ALL_WEEKDAYS
                .into_iter()
                .map(|day| Binding::new(Field::Weekday(day), FormEvent::Changed)),
        );
        bindings.extend([
            Binding::new(Field::Frequency, FormEvent::Changed),
            Binding::new(Field::Count, FormEvent::KeyUp),
            Binding::new(Field::StartTime, FormEvent::TimePicked),
            Binding::new(Field::EndTime, FormEvent::TimePicked),
            Binding::new(Field::ExtraDays, FormEvent::Changed),
            Binding::new(Field::SpecificTime, FormEvent::Changed),
        ]);
        bindings
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn is_bound(&self, field: Field, event: FormEvent) -> bool {
        self.bindings.contains(&Binding::new(field, event))
    }

    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    pub fn rendered(&self) -> &DateList {
        &self.rendered
    }

    /// Stores a raw field value without recomputing.
    ///
    /// Weekday and specific-time fields are checkboxes: any non-empty value
    /// other than `false`/`0` checks them.
    pub fn set_value(&mut self, field: Field, value: &str) {
        let text = (!value.is_empty()).then(|| value.to_string());
        match field {
            Field::StartDate => self.inputs.start_date = text,
            Field::EndDate => self.inputs.end_date = text,
            Field::Count => self.inputs.count = text,
            Field::Frequency => self.inputs.frequency = text,
            Field::StartTime => self.inputs.start_time = text,
            Field::EndTime => self.inputs.end_time = text,
            Field::ExtraDays => self.inputs.extra_days = text,
            Field::SpecificTime => self.inputs.specific_time = is_checked(value),
            Field::Weekday(day) => self.set_weekday(day, is_checked(value)),
        }
    }

    fn set_weekday(&mut self, day: Weekday, checked: bool) {
        self.inputs.weekdays.retain(|name| parse_weekday_name(name) != Some(day));
        if checked {
            self.inputs.weekdays.push(format!("RRule.{}", weekday_code(day)));
        }
    }

    /// Handles an event on a field. Returns whether the list was recomputed.
    pub fn dispatch(&mut self, field: Field, event: FormEvent) -> bool {
        // Picking an end date and typing a count exclude each other.
        match (field, event) {
            (Field::EndDate, FormEvent::PickerClosed) if self.inputs.end_date.is_some() => {
                self.inputs.count = None;
            }
            (Field::Count, FormEvent::KeyUp) if self.inputs.count.is_some() => {
                self.inputs.end_date = None;
            }
            _ => {}
        }

        if !self.is_bound(field, event) {
            debug!(?field, ?event, "Event has no recompute binding");
            return false;
        }
        self.recompute();
        true
    }

    /// Sets a value and fires the event in one step.
    pub fn input(&mut self, field: Field, value: &str, event: FormEvent) -> bool {
        self.set_value(field, value);
        self.dispatch(field, event)
    }

    /// Replaces the rendered list with a fresh computation.
    pub fn recompute(&mut self) -> &DateList {
        self.rendered = DateList { items: self.formatter.recompute(&self.inputs) };
        &self.rendered
    }
}

fn is_checked(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "" | "false" | "0" | "off")
}
