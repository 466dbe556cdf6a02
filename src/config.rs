//! Game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for a solitaire session.
///
/// Every field has a default, so an empty or partial TOML file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct SolitaireConfig {
    /// Path of the SQLite database holding saved games.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Pause between replayed moves when reloading, in milliseconds.
    #[serde(default = "default_replay_delay_ms")]
    replay_delay_ms: u64,

    /// Slot holding the shuffled deck.
    #[serde(default = "default_deck_key")]
    deck_key: String,

    /// Slot holding the move history.
    #[serde(default = "default_history_key")]
    history_key: String,
}

#[instrument]
fn default_db_path() -> String {
    "strictly_solitaire.db".to_string()
}

#[instrument]
fn default_replay_delay_ms() -> u64 {
    200
}

#[instrument]
fn default_deck_key() -> String {
    "SolDeck".to_string()
}

#[instrument]
fn default_history_key() -> String {
    "SolHist".to_string()
}

impl Default for SolitaireConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            replay_delay_ms: default_replay_delay_ms(),
            deck_key: default_deck_key(),
            history_key: default_history_key(),
        }
    }
}

impl SolitaireConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content), fields(len = content.len()))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` when it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be loaded.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Replay pause as a [`Duration`].
    pub fn replay_delay(&self) -> Duration {
        Duration::from_millis(self.replay_delay_ms)
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
