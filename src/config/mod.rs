//! Configuration management for docket.
//!
//! Configuration is read from `~/.config/docket/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::normalizer::{DEFAULT_DATETIME_FORMAT, DEFAULT_PLACEHOLDER};
use crate::sync::SyncOptions;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub sync: SyncConfig,
    pub display: DisplayConfig,
}

/// Where the hearings service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4000/graphql".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Undo the optimistic bookmark flag when the remote change fails (default: true)
    pub revert_on_failure: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            revert_on_failure: true,
        }
    }
}

impl From<&SyncConfig> for SyncOptions {
    fn from(config: &SyncConfig) -> Self {
        SyncOptions {
            revert_on_failure: config.revert_on_failure,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono format string for hearing times
    pub datetime_format: String,

    /// Shown instead of a hearing time that can't be normalized
    pub placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/docket/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("docket").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# docket configuration

[remote]
# GraphQL endpoint of the hearings service
endpoint = "http://localhost:4000/graphql"

# Request timeout in seconds
timeout_secs = 10

[sync]
# Put the bookmark flag back when adding or removing a bookmark fails.
# The status is re-checked with the service either way.
revert_on_failure = true

[display]
# chrono strftime syntax
datetime_format = "%A, %B %-d, %Y, %-I:%M:%S %p"

# Shown when a hearing time can't be read
placeholder = "Date unavailable"
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
