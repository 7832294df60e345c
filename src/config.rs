//! Client configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::mode::GameMode;

/// Environment variable overriding the server URL.
pub const ENV_SERVER_URL: &str = "WORDLE_SERVER_URL";
/// Environment variable overriding the game mode.
pub const ENV_MODE: &str = "WORDLE_MODE";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "WORDLE_TIMEOUT_SECS";

/// Settings for the game client.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct WordleConfig {
    /// Base URL of the scoring service.
    server_url: String,

    /// Which start-game endpoint to use.
    mode: GameMode,

    /// Deadline for each request, in seconds.
    request_timeout_secs: u64,

    /// How long notices stay on screen, in seconds.
    notice_secs: u64,

    /// Maximum number of suggestions to display.
    suggestion_limit: usize,

    /// Where the TUI writes its log.
    log_file: PathBuf,
}

impl Default for WordleConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5001".to_string(),
            mode: GameMode::Random,
            request_timeout_secs: 10,
            notice_secs: 3,
            suggestion_limit: 10,
            log_file: PathBuf::from("strictly_wordle.log"),
        }
    }
}

impl WordleConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads defaults, then the file (if given), then the environment.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVER_URL) {
            debug!(url = %url, "Server URL from environment");
            self.server_url = url;
        }
        if let Some(mode) = lookup(ENV_MODE) {
            self.mode = GameMode::from_str(&mode).map_err(|_| {
                ConfigError::new(format!("Unknown game mode in {}: {}", ENV_MODE, mode))
            })?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = secs.parse().map_err(|_| {
                ConfigError::new(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
            })?;
        }
        Ok(self)
    }

    /// Checks that the settings are usable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.trim().is_empty() {
            return Err(ConfigError::new("server_url must not be empty".to_string()));
        }
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            warn!(server_url = %self.server_url, "Server URL has no http(s) scheme");
            return Err(ConfigError::new(format!(
                "server_url must start with http:// or https://, got {}",
                self.server_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::new("request_timeout_secs must be positive".to_string()));
        }
        if self.notice_secs == 0 {
            return Err(ConfigError::new("notice_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Notice display interval.
    pub fn notice_lifetime(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
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
