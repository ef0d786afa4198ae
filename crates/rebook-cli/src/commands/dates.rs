use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use rebook_core::error::CoreError;
use rebook_core::form::{DateList, RecurrenceForm};
use rebook_core::formatter::{FormInputs, FormatterConfig, RecurrenceIntervalFormatter};
use rebook_core::models::parse_extra_days;
use rebook_core::recurrence::RRuleEngine;
use tracing::{debug, info};

use crate::cli::{DatesCommand, OutputFormat};
use crate::config::Config;
use crate::parser::{
    parse_count_arg, parse_date_arg, parse_frequency_arg, parse_time_arg, parse_weekdays_arg,
};
use crate::views::table::display_dates;

pub fn dates_command(command: DatesCommand, config: &Config) -> Result<()> {
    let inputs = build_inputs(&command, config)?;
    let output = command.output.unwrap_or(config.output);

    let formatter = RecurrenceIntervalFormatter::new(
        RRuleEngine::new(config.max_occurrences),
        FormatterConfig { max_occurrences: config.max_occurrences },
    );

    if command.show_rule {
        if let Some(spec) = formatter.build_spec(&inputs) {
            // stderr keeps json and html output parseable
            eprintln!("{}", spec.to_rrule_string().dimmed());
        }
    }

    let form = RecurrenceForm::with_inputs(formatter, inputs);
    let list = form.rendered();
    info!(occurrences = list.len(), "Generated booking dates");

    print_list(list, output)
}

/// Validates the arguments and turns them into raw form inputs.
pub fn build_inputs(command: &DatesCommand, config: &Config) -> Result<FormInputs> {
    parse_date_arg("start", &command.start)?;
    if let Some(until) = &command.until {
        parse_date_arg("until", until)?;
    }
    if let Some(count) = &command.count {
        parse_count_arg(count)?;
    }
    if command.until.is_none() && command.count.is_none() {
        return Err(anyhow!(CoreError::InvalidInput(
            "Either --until or --count is required".to_string()
        )));
    }

    let frequency = command
        .frequency
        .clone()
        .unwrap_or_else(|| config.default_frequency.clone());
    parse_frequency_arg(&frequency)?;

    if let Some(start_time) = &command.start_time {
        parse_time_arg("from", start_time)?;
    }
    if let Some(end_time) = &command.end_time {
        parse_time_arg("to", end_time)?;
    }
    if let Some(extra_days) = &command.extra_days {
        if extra_days.trim().parse::<i64>().is_err() {
            return Err(anyhow!(CoreError::InvalidInput(format!(
                "Extra days must be a whole number, got '{extra_days}'"
            ))));
        }
        debug!(extra_days = parse_extra_days(extra_days), "Using extra days");
    }

    Ok(FormInputs {
        start_date: Some(command.start.clone()),
        // The end date wins when both are given.
        end_date: command.until.clone(),
        count: command.count.clone(),
        frequency: Some(frequency),
        weekdays: parse_weekdays_arg(&command.on)?,
        start_time: command.start_time.clone(),
        end_time: command.end_time.clone(),
        extra_days: command.extra_days.clone(),
        specific_time: config.specific_time && !command.date_only,
    })
}

fn print_list(list: &DateList, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::List => {
            if list.is_empty() {
                println!("{}", "No occurrences.".yellow());
            }
            for label in list.labels() {
                println!("{label}");
            }
        }
        OutputFormat::Html => println!("{}", list.to_html()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(list)?),
        OutputFormat::Table => display_dates(list),
    }
    Ok(())
}
