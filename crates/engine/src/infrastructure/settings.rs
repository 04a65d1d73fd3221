//! Engine configuration.
//!
//! Result caps and the class tables are configuration; the match
//! thresholds are not (they are semantic constants of the scoring model
//! and live in `clockwork_domain::matcher`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use clockwork_domain::ClassConfig;

/// Environment variable naming an optional JSON config file.
const CONFIG_PATH_VAR: &str = "CLOCKWORK_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for the engine. Every field has a default, so a missing or
/// partial config file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Item results returned by a plain substring search.
    pub search_result_cap: usize,
    /// Results collected by the fallback linear spell scan.
    pub spell_scan_cap: usize,
    /// Class aliases, keyword fragments, and spell indicators.
    pub classes: ClassConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_result_cap: 10,
            spell_scan_cap: 25,
            classes: ClassConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file; missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load from the path named by `CLOCKWORK_CONFIG`, or defaults when the
    /// variable is unset. A present-but-broken file is an error rather than
    /// a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                let config = Self::from_json_file(&path)?;
                tracing::info!(path = %path, "Loaded engine config");
                Ok(config)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}
