//! # Rebook Core Library
//!
//! Turns the inputs of a recurring booking form into a concrete list of
//! date/time intervals.
//!
//! ## Features
//!
//! - **Forgiving Input Parsing**: Day-first and year-first date strings,
//!   `HH:MM` times, weekday checkbox names and frequency selector values
//! - **Pluggable Recurrence Engine**: Enumeration sits behind
//!   [`recurrence::RecurrenceEngine`], with an `rrule` backed default
//! - **Overnight Handling**: End times before the start time roll over to the
//!   next day, on top of any extra days
//! - **Observer Bindings**: An enumerable set of field/event triggers that
//!   replace the rendered list on every recompute
//!
//! ## Core Modules
//!
//! - [`models`]: Input parsing and the recurrence spec
//! - [`interval`]: Time-of-day windows and concrete intervals
//! - [`recurrence`]: Recurrence engine trait and `rrule` implementation
//! - [`format`]: Display formatting
//! - [`formatter`]: The recompute pipeline
//! - [`form`]: Field state, bindings and HTML rendering
//! - [`time_interval`]: Single booking interval in its three time modes
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rebook_core::{
//!     formatter::{FormInputs, FormatterConfig, RecurrenceIntervalFormatter},
//!     recurrence::RRuleEngine,
//! };
//!
//! let formatter =
//!     RecurrenceIntervalFormatter::new(RRuleEngine::default(), FormatterConfig::default());
//! let inputs = FormInputs {
//!     start_date: Some("01.01.2024".to_string()),
//!     count: Some("3".to_string()),
//!     start_time: Some("09:00".to_string()),
//!     end_time: Some("10:00".to_string()),
//!     ..Default::default()
//! };
//!
//! let dates = formatter.recompute(&inputs);
//! assert_eq!(dates[0].label, "01.01.2024 09:00 - 10:00");
//! assert_eq!(dates.len(), 3);
//! ```

pub mod error;
pub mod form;
pub mod format;
pub mod formatter;
pub mod interval;
pub mod models;
pub mod recurrence;
pub mod time_interval;
