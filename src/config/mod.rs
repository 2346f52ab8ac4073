//! Configuration management for scalectl

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Backend used when neither flag, env nor config file names one
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Name of the credentials file kept next to the config file
const CREDENTIALS_FILE: &str = "credentials.yaml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the scaling monitor backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Seconds between background refreshes in `metrics watch`
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Number of metric samples requested per fetch
    #[serde(default = "default_metrics_limit")]
    pub metrics_limit: usize,

    /// Number of scaling decisions requested per fetch
    #[serde(default = "default_decisions_limit")]
    pub decisions_limit: usize,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_metrics_limit() -> usize {
    50
}

fn default_decisions_limit() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            poll_interval_secs: default_poll_interval_secs(),
            metrics_limit: default_metrics_limit(),
            decisions_limit: default_decisions_limit(),
            preferences: Preferences::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".scalectl").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Path of the credentials file that belongs to a config file
    pub fn credentials_path(config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) => dir.join(CREDENTIALS_FILE),
            None => PathBuf::from(CREDENTIALS_FILE),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load_from(path) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, contents)?;
        restrict_permissions(path)?;

        Ok(())
    }

    /// Effective API URL: explicit override, then config file, then default
    pub fn api_url(&self, override_url: Option<&str>) -> String {
        override_url
            .map(str::to_string)
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(
                ConfigError::Invalid("poll_interval_secs must be greater than 0".to_string())
                    .into(),
            );
        }
        if let Some(url) = &self.api_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "api_url must start with http:// or https:// (got {url})"
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Set file permissions to 600 on Unix systems
pub(crate) fn restrict_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
