//! Client configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable that overrides the configured server URL.
pub const SERVER_URL_ENV: &str = "TICTACTOE_SERVER_URL";

/// Configuration for the game client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the game server.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Per-request timeout in seconds; `0` disables it.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// File the terminal UI writes its log to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe_client.log")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
            log_file: default_log_file(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
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

    /// Loads from `path` if it exists, else defaults, then applies the
    /// server URL environment override.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        match std::env::var(SERVER_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                info!(server_url = %url, "Server URL taken from environment");
                Ok(config.with_server_url(url.trim()))
            }
            _ => Ok(config),
        }
    }

    /// Replaces the server URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Replaces the timeout; `0` disables it.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Request timeout, if any.
    pub fn timeout(&self) -> Option<u64> {
        (self.timeout_secs > 0).then_some(self.timeout_secs)
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
