//! Loading, validating and writing `config.toml`
//!
//! A missing file is not an error: every field has a default, so rack runs
//! with the standard 45 lb bar and ten pairs of each plate out of the box.

pub mod schema;

pub use schema::Config;

use crate::error::{RackError, RackResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Owns the location of the config file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for the per-user config file
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Manager for an explicit file, e.g. from `--config`
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// `--config` when given, otherwise the per-user file
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        explicit.map_or_else(Self::new, Self::with_path)
    }

    /// `<config dir>/rack/config.toml`, or `./rack/config.toml` without a home
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rack")
            .join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load the file, or the defaults when there is none
    pub async fn load(&self) -> RackResult<Config> {
        if !self.config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Parse and validate one file
    pub async fn load_from_file(&self, path: &Path) -> RackResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RackError::io(format!("reading config from {}", path.display()), e))?;

        let invalid = |reason: String| RackError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        };
        let config: Config = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        config.validate().map_err(invalid)?;

        debug!(
            "Loaded config from {} (bar {} lb, cache ttl {}s, {} expiry)",
            path.display(),
            config.defaults.bar_weight,
            config.cache.ttl_secs,
            config.cache.expiry
        );
        Ok(config)
    }

    /// Write `config`, refusing values that `load` would reject
    pub async fn save(&self, config: &Config) -> RackResult<()> {
        config.validate().map_err(|reason| RackError::ConfigInvalid {
            path: self.config_path.clone(),
            reason,
        })?;

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RackError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            RackError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Write the default config; returns false if a file exists and `force` is off
    pub async fn init(&self, force: bool) -> RackResult<bool> {
        if self.config_path.exists() && !force {
            return Ok(false);
        }
        self.save(&Config::default()).await?;
        Ok(true)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
