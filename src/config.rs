use std::path::Path;

use log::warn;

use crate::ai::{Difficulty, DEFAULT_DEPTH};
use crate::error::ConfigError;
use crate::session::OpponentMode;

/// Deepest search the config accepts.
pub const MAX_SEARCH_DEPTH: usize = 10;

/// Longest delay before a machine reply, in milliseconds.
pub const MAX_MACHINE_DELAY_MS: u64 = 10_000;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub search: SearchConfig,
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: OpponentMode,
    pub difficulty: Difficulty,
    /// Pause before the machine replies, so the human move is seen first.
    pub machine_delay_ms: u64,
    /// Seed for the easy/medium random choices. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: OpponentMode::HumanVsHuman,
            difficulty: Difficulty::Medium,
            machine_delay_ms: 500,
            seed: None,
        }
    }
}

/// Hard-difficulty search settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be >= 1".into(),
            ));
        }
        if self.search.depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.depth must be <= {MAX_SEARCH_DEPTH}"
            )));
        }
        if self.game.machine_delay_ms > MAX_MACHINE_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "game.machine_delay_ms must be <= {MAX_MACHINE_DELAY_MS}"
            )));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
