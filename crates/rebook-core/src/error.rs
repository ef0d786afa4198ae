use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRRule(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
