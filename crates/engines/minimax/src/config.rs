//! Engine configuration and the depth policy.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::{noise::NoiseModel, rules::SearchPosition, search::SearchOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables of [`MinimaxEngine`](crate::MinimaxEngine). Every field has a
/// default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Plies searched while the board is still busy
    pub search_depth_default: u8,
    /// Plies searched once few pieces remain
    pub search_depth_endgame: u8,
    /// Occupied squares (kings included) at or below which the endgame depth applies
    pub endgame_piece_threshold: usize,
    /// Half-width of the uniform leaf noise; 0 disables it
    pub noise_range: f64,
    pub naturalism_filter: bool,
    /// Seed for the engine's random stream; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth_default: 3,
            search_depth_endgame: 8,
            endgame_piece_threshold: 3,
            noise_range: 5.0,
            naturalism_filter: true,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Reads and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        contents.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth_default == 0 || self.search_depth_endgame == 0 {
            return Err(ConfigError::Invalid("search depths must be at least 1".into()));
        }
        if !self.noise_range.is_finite() || self.noise_range < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "noise_range must be a finite non-negative number, got {}",
                self.noise_range
            )));
        }
        Ok(())
    }

    /// Search depth for `pos`: the endgame depth once the number of occupied
    /// squares drops to the threshold, the default depth otherwise.
    pub fn depth_for<P: SearchPosition + ?Sized>(&self, pos: &P) -> u8 {
        if pos.piece_count() <= self.endgame_piece_threshold {
            self.search_depth_endgame
        } else {
            self.search_depth_default
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            naturalism_filter: self.naturalism_filter,
            pruning: true,
            noise: NoiseModel::uniform(self.noise_range),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl FromStr for EngineConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
