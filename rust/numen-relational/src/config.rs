//! Comparison settings, optionally loaded from a `numen.toml` file.
//!
//! ```toml
//! epsilon = 1e-10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Relative tolerance used when no configuration overrides it.
pub const DEFAULT_EPSILON: f64 = 1e-12;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("epsilon must be a positive finite number, got {0}")]
    InvalidEpsilon(f64),
}

/// Immutable settings snapshot read by every comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Relative tolerance below which two magnitudes are treated as equal.
    pub epsilon: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Config {
    pub fn with_epsilon(epsilon: f64) -> Result<Self, ConfigError> {
        let config = Config { epsilon };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epsilon.is_finite() && self.epsilon > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidEpsilon(self.epsilon))
        }
    }

    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match Self::from_toml_str(&content) {
            Ok(config) => {
                debug!(path = %path.display(), epsilon = config.epsilon, "loaded comparison config");
                Ok(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "rejected comparison config");
                Err(e)
            }
        }
    }
}
