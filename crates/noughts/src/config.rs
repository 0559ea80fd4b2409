//! Frontend configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use noughts_core::Mode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for the terminal frontend.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct Config {
    /// JSON file holding the saved session.
    #[serde(default = "default_save_path")]
    save_path: PathBuf,

    /// File receiving tracing output.
    #[serde(default = "default_log_path")]
    log_path: PathBuf,

    /// Mode used when there is no saved session.
    #[serde(default)]
    default_mode: Mode,

    /// Pause before the AI move is applied, in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Delay before a finished board clears itself, in milliseconds (0 disables).
    #[serde(default = "default_auto_reset_ms")]
    auto_reset_ms: u64,
}

fn default_save_path() -> PathBuf {
    PathBuf::from("noughts_save.json")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("noughts.log")
}

fn default_ai_delay_ms() -> u64 {
    500
}

fn default_auto_reset_ms() -> u64 {
    2500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            log_path: default_log_path(),
            default_mode: Mode::default(),
            ai_delay_ms: default_ai_delay_ms(),
            auto_reset_ms: default_auto_reset_ms(),
        }
    }
}

impl Config {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(save_path = %config.save_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Pause before the AI move is applied.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Delay before a finished board clears itself, if enabled.
    pub fn auto_reset(&self) -> Option<Duration> {
        (self.auto_reset_ms > 0).then(|| Duration::from_millis(self.auto_reset_ms))
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
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
