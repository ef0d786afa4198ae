use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

use crate::cli::OutputFormat;

pub const CONFIG_FILE: &str = "rebook.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Upper bound on generated occurrences per command
    pub max_occurrences: usize,
    /// Frequency used when `--frequency` is not given
    pub default_frequency: String,
    /// Output format used when `--output` is not given
    pub output: OutputFormat,
    /// Default tracing filter
    pub log_level: String,
    /// Whether occurrences show times unless `--date-only` is passed
    pub specific_time: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_occurrences: rebook_core::recurrence::DEFAULT_MAX_OCCURRENCES,
            default_frequency: "weekly".to_string(),
            output: OutputFormat::List,
            log_level: "warn".to_string(),
            specific_time: true,
        }
    }
}

impl Config {
    /// Layers the TOML file (if present) and `REBOOK_` environment variables
    /// over the defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("REBOOK_"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_path(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.max_occurrences, Config::default().max_occurrences);
        assert_eq!(config.output, OutputFormat::List);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rebook.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "max_occurrences = 12\noutput = \"html\"\nspecific_time = false").unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.max_occurrences, 12);
        assert_eq!(config.output, OutputFormat::Html);
        assert!(!config.specific_time);
        assert_eq!(config.default_frequency, "weekly");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rebook.toml");
        std::fs::write(&path, "max_occurrences = \"lots\"").unwrap();
        assert!(Config::from_path(&path).is_err());
    }
}
