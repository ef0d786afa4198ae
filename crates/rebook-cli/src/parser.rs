use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rebook_core::error::CoreError;
use rebook_core::models::{parse_count, parse_date_str, parse_weekday_name, Frequency, TimeOfDay};
use rebook_core::time_interval::TimeMode;

// The form layer swallows bad input; on the command line it is reported.

pub fn parse_date_arg(name: &str, value: &str) -> Result<NaiveDate> {
    parse_date_str(value).map_err(|e| anyhow!(e).context(format!("Failed to parse --{name}")))
}

pub fn parse_time_arg(name: &str, value: &str) -> Result<TimeOfDay> {
    value
        .parse::<TimeOfDay>()
        .map_err(|e| anyhow!(e).context(format!("Failed to parse --{name}")))
}

pub fn parse_count_arg(value: &str) -> Result<u32> {
    parse_count(value).ok_or_else(|| {
        anyhow!(CoreError::InvalidInput(format!(
            "Count must be a non-negative whole number, got '{value}'"
        )))
    })
}

pub fn parse_frequency_arg(value: &str) -> Result<Frequency> {
    value
        .parse::<Frequency>()
        .map_err(|_| anyhow!(CoreError::InvalidFrequency(value.to_string())))
}

/// Accepts the widget's selector values, with `-` or `_` separators.
pub fn parse_mode_arg(value: &str, duration_minutes: u32) -> Result<TimeMode> {
    TimeMode::from_field(value, duration_minutes)
        .map_err(|e| anyhow!(CoreError::InvalidInput(e.to_string())))
}

/// Validates weekday names and returns them as form checkbox names.
pub fn parse_weekdays_arg(values: &[String]) -> Result<Vec<String>> {
    values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            parse_weekday_name(v)
                .map(|day| format!("RRule.{}", rebook_core::models::weekday_code(day)))
                .ok_or_else(|| anyhow!(CoreError::InvalidInput(format!("Unknown weekday '{v}'"))))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_weekdays_are_normalized() {
        let names = ["mo".to_string(), "Friday".to_string(), "".to_string()];
        let days = parse_weekdays_arg(&names).unwrap();
        assert_eq!(days, vec!["RRule.MO", "RRule.FR"]);
    }

    #[test]
    fn test_unknown_weekday_is_reported() {
        let err = parse_weekdays_arg(&["funday".to_string()]).unwrap_err();
        assert!(matches!(err.downcast_ref::<CoreError>(), Some(CoreError::InvalidInput(_))));
    }

    #[rstest]
    #[case("3", true)]
    #[case("03", true)]
    #[case("-3", false)]
    #[case("three", false)]
    fn test_count(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(parse_count_arg(value).is_ok(), ok);
    }

    #[test]
    fn test_date_error_keeps_core_error() {
        let err = parse_date_arg("start", "32.01.2024").unwrap_err();
        assert!(err
            .chain()
            .any(|e| matches!(e.downcast_ref::<CoreError>(), Some(CoreError::InvalidDate(_)))));
    }

    #[test]
    fn test_frequency() {
        assert_eq!(parse_frequency_arg("trimonthly").unwrap(), Frequency::Trimonthly);
        assert!(parse_frequency_arg("daily").is_err());
    }

    #[rstest]
    #[case("full-days", TimeMode::FullDays)]
    #[case("use_duration", TimeMode::UseDuration { minutes: 45 })]
    #[case("Time-And-Date", TimeMode::TimeAndDate)]
    fn test_mode(#[case] value: &str, #[case] expected: TimeMode) {
        assert_eq!(parse_mode_arg(value, 45).unwrap(), expected);
    }

    #[test]
    fn test_unknown_mode_is_reported() {
        let err = parse_mode_arg("half-days", 60).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidInput(msg)) if msg.contains("half-days")
        ));
    }
}
