use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands against an isolated config file
pub struct CliTestHarness {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with an empty temporary directory
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("rebook.toml");

        Self {
            temp_dir,
            config_path,
        }
    }

    /// Create a harness whose config file has the given TOML content
    pub fn with_config(toml: &str) -> Self {
        let harness = Self::new();
        std::fs::write(&harness.config_path, toml).expect("Failed to write config file");
        harness
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("rebook").expect("Failed to find rebook binary");

        cmd.current_dir(self.temp_dir.path())
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config_path);

        cmd
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Three weekly occurrences from the first Monday of 2024
    pub fn weekly_args() -> Vec<&'static str> {
        vec!["dates", "--start", "01.01.2024", "--count", "3", "--frequency", "weekly"]
    }
}

/// Common output assertions
pub mod assertions {
    use super::*;

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error:")
    }
}
