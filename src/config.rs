//! Game configuration.

use crate::games::tictactoe::DEFAULT_RANDOM_ICONS;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Delay before the computer's move lands, in milliseconds.
pub const DEFAULT_COMPUTER_DELAY_MS: u64 = 500;

/// Tunables for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Pause before the computer plays.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Icons drawn from the pool in addition to X and O.
    #[serde(default = "default_random_icons")]
    random_icons: usize,

    /// Fixed RNG seed; random when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_computer_delay_ms() -> u64 {
    DEFAULT_COMPUTER_DELAY_MS
}

fn default_random_icons() -> usize {
    DEFAULT_RANDOM_ICONS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            computer_delay_ms: default_computer_delay_ms(),
            random_icons: default_random_icons(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// The computer's thinking pause.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    /// Overrides the thinking pause.
    pub fn with_computer_delay_ms(mut self, ms: u64) -> Self {
        self.computer_delay_ms = ms;
        self
    }

    /// Overrides the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the number of random icons.
    pub fn with_random_icons(mut self, count: usize) -> Self {
        self.random_icons = count;
        self
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

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.computer_delay(), Duration::from_millis(500));
        assert_eq!(*config.random_icons(), 6);
    }

    #[test]
    fn test_partial_toml() {
        let config: GameConfig = toml::from_str("seed = 9\ncomputer_delay_ms = 10").unwrap();
        assert_eq!(*config.seed(), Some(9));
        assert_eq!(*config.computer_delay_ms(), 10);
        assert_eq!(*config.random_icons(), 6);
    }
}
