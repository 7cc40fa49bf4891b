//! Application configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Settings for the crossword player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CrosswordConfig {
    /// SQLite database file (created if missing).
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Directory that receives shared completion cards.
    #[serde(default = "default_share_dir")]
    share_dir: PathBuf,

    /// Redraw interval for the running clock, in milliseconds.
    #[serde(default = "default_tick_millis")]
    tick_millis: u64,

    /// Log file for the terminal UI.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_db_path() -> String {
    "crossword.db".to_string()
}

#[instrument]
fn default_share_dir() -> PathBuf {
    PathBuf::from("shares")
}

#[instrument]
fn default_tick_millis() -> u64 {
    250
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("crossword.log")
}

impl Default for CrosswordConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            share_dir: default_share_dir(),
            tick_millis: default_tick_millis(),
            log_file: default_log_file(),
        }
    }
}

impl CrosswordConfig {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is
    /// an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.tick_millis == 0 {
            return Err(ConfigError::new("tick_millis must be positive".to_string()));
        }

        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Replaces the database path (command-line override).
    pub fn with_db_path(mut self, db_path: Option<String>) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        self
    }

    /// Clock redraw interval.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = CrosswordConfig::from_file("/nonexistent/crossword.toml").expect("Defaults");
        assert_eq!(config, CrosswordConfig::default());
        assert_eq!(config.tick(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("Temp file");
        writeln!(file, "db_path = \"puzzles.db\"\ntick_millis = 100").expect("Write");

        let config = CrosswordConfig::from_file(file.path()).expect("Loads");
        assert_eq!(config.db_path(), "puzzles.db");
        assert_eq!(*config.tick_millis(), 100);
        assert_eq!(config.share_dir(), &PathBuf::from("shares"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("Temp file");
        writeln!(file, "tick_millis = \"fast\"").expect("Write");
        assert!(CrosswordConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_cli_override() {
        let config = CrosswordConfig::default().with_db_path(Some("other.db".to_string()));
        assert_eq!(config.db_path(), "other.db");
        let config = config.with_db_path(None);
        assert_eq!(config.db_path(), "other.db");
    }
}
