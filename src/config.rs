//! Game configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::{Result, ScoringError};

/// Constants a game is constructed with.
///
/// Every field has a default, so a YAML document only needs the values it
/// changes:
///
/// ```rust
/// use oche::GameConfig;
///
/// let config = GameConfig::from_yaml("start_score: 301\n").unwrap();
/// assert_eq!(config.start_score, 301);
/// assert_eq!(config.total_rounds, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Score every game starts from
    pub start_score: u32,
    /// Highest round number the counter reaches
    pub total_rounds: u32,
    /// Number of closed rounds shown in the recent history view
    pub history_window: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { start_score: 501, total_rounds: 10, history_window: 6 }
    }
}

impl GameConfig {
    pub fn with_start_score(mut self, start_score: u32) -> Self {
        self.start_score = start_score;
        self
    }

    pub fn with_total_rounds(mut self, total_rounds: u32) -> Self {
        self.total_rounds = total_rounds;
        self
    }

    pub fn with_history_window(mut self, history_window: usize) -> Self {
        self.history_window = history_window;
        self
    }

    /// Check the values describe a playable game.
    pub fn validate(&self) -> Result<()> {
        if self.start_score <= 1 {
            return Err(ScoringError::InvalidStartScore { start_score: self.start_score });
        }
        if self.total_rounds == 0 {
            return Err(ScoringError::invalid_config("total_rounds", "must be at least 1"));
        }
        if self.history_window == 0 {
            return Err(ScoringError::invalid_config("history_window", "must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: GameConfig = serde_yaml_ng::from_str(yaml)
            .map_err(|e| ScoringError::parse_error("GameConfig deserialization", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::file_error(path.to_path_buf(), e))?;
        let config = Self::from_yaml(&yaml)?;
        debug!(path = %path.display(), ?config, "Loaded game config");
        Ok(config)
    }
}
