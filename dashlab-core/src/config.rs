//! Dashboard configuration loaded from TOML.
//!
//! ```toml
//! seed = 202311
//! range = 6
//! period = 7
//!
//! [toggles]
//! visits = true
//! signups = true
//! conversions = false
//! ```
//!
//! Every key is optional and falls back to the demo defaults.

use crate::dashboard::{MetricToggles, RangePreset, UpdateRequest, DEMO_SEED};
use crate::smoothing::DEFAULT_PERIOD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub seed: i64,
    pub range: RangePreset,
    pub period: usize,
    pub toggles: MetricToggles,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed: DEMO_SEED,
            range: RangePreset::default(),
            period: DEFAULT_PERIOD,
            toggles: MetricToggles::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period == 0 {
            return Err(ConfigError::Invalid("period must be >= 1".into()));
        }
        Ok(())
    }

    pub fn to_request(&self) -> UpdateRequest {
        UpdateRequest {
            range: self.range,
            toggles: self.toggles,
            seed: self.seed,
            period: self.period,
        }
    }
}
