use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

/// Preview the dates a recurring booking will occupy
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log filter, overrides the configured level (e.g. "debug")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Configuration file
    #[arg(long, global = true, default_value = crate::config::CONFIG_FILE)]
    pub config: std::path::PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the intervals of a recurring booking
    Dates(DatesCommand),
    /// Describe a single booking interval
    Interval(IntervalCommand),
    /// List the available repetition frequencies
    Frequencies,
}

#[derive(Parser, Debug, Clone)]
pub struct DatesCommand {
    /// First date of the series (e.g. '01.01.2024')
    #[arg(long)]
    pub start: String,
    /// Last date of the series, inclusive; wins over --count
    #[arg(long)]
    pub until: Option<String>,
    /// Number of occurrences
    #[arg(long)]
    pub count: Option<String>,
    /// Repetition frequency (weekly, monthly, trimonthly, halfyearly, yearly)
    #[arg(long)]
    pub frequency: Option<String>,
    /// Days of week (mo,tu,we,th,fr,sa,su)
    #[arg(long, value_delimiter = ',')]
    pub on: Vec<String>,
    /// Start time of each occurrence (HH:MM)
    #[arg(long = "from")]
    pub start_time: Option<String>,
    /// End time of each occurrence (HH:MM)
    #[arg(long = "to")]
    pub end_time: Option<String>,
    /// Additional days between start and end of each occurrence
    #[arg(long, allow_hyphen_values = true)]
    pub extra_days: Option<String>,
    /// Only show dates, without times
    #[arg(long)]
    pub date_only: bool,
    /// Output format
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,
    /// Print the generated RRULE to stderr before the dates
    #[arg(long)]
    pub show_rule: bool,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    List,
    Html,
    Json,
    Table,
}

#[derive(Parser, Debug, Clone)]
pub struct IntervalCommand {
    /// How the interval is entered: full-days, use-duration or time-and-date
    #[arg(long, default_value = "time-and-date")]
    pub mode: String,
    #[arg(long)]
    pub start_date: String,
    #[arg(long)]
    pub start_time: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub end_time: Option<String>,
    /// Length in minutes for the use-duration mode
    #[arg(long, default_value_t = 60)]
    pub duration: u32,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
