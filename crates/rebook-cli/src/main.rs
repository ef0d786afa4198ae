use clap::Parser;
use owo_colors::{OwoColorize, Style};
use rebook_core::error::CoreError;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod views;

fn main() {
    let cli = cli::Cli::parse();

    let loaded = config::Config::from_path(&cli.config);
    let level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.log_level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    init_logging(&level);

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(
            error = %e,
            path = %cli.config.display(),
            "Failed to load config, using defaults"
        );
        config::Config::default()
    });
    tracing::debug!(config = ?config, "Configuration loaded");

    let result = match cli.command {
        cli::Commands::Dates(command) => commands::dates::dates_command(command, &config),
        cli::Commands::Interval(command) => commands::interval::interval_command(command),
        cli::Commands::Frequencies => commands::frequencies_command(),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::InvalidDate(s)) => {
            eprintln!(
                "{} Invalid date '{}'. Use DD.MM.YYYY or YYYY-MM-DD.",
                "Error:".style(error_style),
                s.yellow()
            );
        }
        Some(CoreError::InvalidTime(s)) => {
            eprintln!(
                "{} Invalid time '{}'. Use HH:MM.",
                "Error:".style(error_style),
                s.yellow()
            );
        }
        Some(CoreError::InvalidFrequency(s)) => {
            eprintln!("{} Unknown frequency '{}'.", "Error:".style(error_style), s.yellow());
            eprintln!("Run 'rebook frequencies' to see the available choices.");
        }
        Some(CoreError::InvalidInput(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
