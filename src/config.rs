// ABOUTME: Configuration for toast timing and the simulated notification feed
// Loaded from config.toml in the user's config directory, falling back to defaults

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to render config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Feed probability must be within 0.0..=1.0, got {0}")]
    InvalidProbability(f64),

    #[error("Feed interval must be greater than zero")]
    ZeroInterval,

    #[error("Toast duration must be greater than zero")]
    ZeroToastDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NotifyConfig {
    pub toasts: ToastConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub default_duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 5000,
        }
    }
}

impl ToastConfig {
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Whether the demo binary mounts the simulated feed.
    pub enabled: bool,
    pub interval_ms: u64,
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 30_000,
            probability: 0.3,
            seed: None,
        }
    }
}

impl FeedConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl NotifyConfig {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "campus-notify").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads the user's config file if it exists, otherwise the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.feed.probability) {
            return Err(ConfigError::InvalidProbability(self.feed.probability));
        }
        if self.feed.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.toasts.default_duration_ms == 0 {
            return Err(ConfigError::ZeroToastDuration);
        }
        Ok(())
    }
}
