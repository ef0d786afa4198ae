use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use rebook_core::error::CoreError;
use rebook_core::time_interval::{describe, TimeIntervalInputs};
use serde_json::json;

use crate::cli::IntervalCommand;
use crate::parser::{parse_date_arg, parse_mode_arg, parse_time_arg};

pub fn interval_command(command: IntervalCommand) -> Result<()> {
    let mode = parse_mode_arg(&command.mode, command.duration)?;
    parse_date_arg("start-date", &command.start_date)?;
    if let Some(end_date) = &command.end_date {
        parse_date_arg("end-date", end_date)?;
    }
    if let Some(start_time) = &command.start_time {
        parse_time_arg("start-time", start_time)?;
    }
    if let Some(end_time) = &command.end_time {
        parse_time_arg("end-time", end_time)?;
    }

    let inputs = TimeIntervalInputs {
        start_date: Some(command.start_date),
        start_time: command.start_time,
        end_date: command.end_date,
        end_time: command.end_time,
    };

    let outcome = describe(mode, &inputs)
        .ok_or_else(|| anyhow!(CoreError::InvalidInput("Interval is out of range".to_string())))?;

    if command.json {
        let value = json!({
            "display": &outcome.display,
            "start": outcome.stored_start(),
            "end": outcome.stored_end(),
            "specific_time": outcome.specific_time,
            "widgets": outcome.widget_fields(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", outcome.display.bold());
    println!("Start: {}", outcome.stored_start().green());
    println!("End:   {}", outcome.stored_end().green());
    println!(
        "Specific time: {}",
        if outcome.specific_time { "Yes" } else { "No" }
    );
    Ok(())
}
