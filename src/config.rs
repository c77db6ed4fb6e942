//! Configuration file loading.
//!
//! A config file is a JSON object; every key is optional and falls back to
//! the defaults of [`SimulationParams`] and [`RuleWeights`].
//!
//! ```json
//! {
//!   "seed": 7,
//!   "log_filter": "boid_hunt=debug",
//!   "params": { "boid": { "count": 300 }, "visibility_threshold": 12.0 },
//!   "rules": { "separation": 1.2 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::params::SimulationParams;
use crate::rules::RuleWeights;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or produce JSON.
    #[error("invalid config JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for every random draw in the run.
    pub seed: u64,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub params: SimulationParams,
    pub rules: RuleWeights,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            log_filter: "info".to_string(),
            params: SimulationParams::default(),
            rules: RuleWeights::default(),
        }
    }
}

impl SimulationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
