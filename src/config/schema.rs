//! Configuration schema for rack
//!
//! Configuration is stored at `~/.config/rack/config.toml`

use crate::cache::ExpiryPolicy;
use crate::plate::Equipment;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// HTTP listener settings
    pub server: ServerConfig,

    /// Result cache settings
    pub cache: CacheConfig,

    /// Bar and plates assumed when a request lists none
    pub defaults: Equipment,
}

impl Config {
    /// Check values that parse but cannot be served
    pub fn validate(&self) -> Result<(), String> {
        if self.defaults.bar_weight < 0 {
            return Err(format!(
                "defaults.bar_weight cannot be negative (got {})",
                self.defaults.bar_weight
            ));
        }
        if !matches!(self.general.log_format.as_str(), "text" | "json") {
            return Err(format!(
                "general.log_format must be \"text\" or \"json\" (got {:?})",
                self.general.log_format
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err("server.host cannot be empty".to_string());
        }
        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry lifetime in seconds (0 or negative = never expire)
    pub ttl_secs: i64,

    /// Expiry behaviour: "timer" or "lazy"
    pub expiry: ExpiryPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            expiry: ExpiryPolicy::Timer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::{Denomination, PlateCounts};

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[cache]"));
        assert!(toml.contains("[defaults.plates]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.defaults, Equipment::standard());
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [cache]
            expiry = "lazy"

            [defaults]
            bar_weight = 35

            [defaults.plates]
            fortyFives = 4
            tens = 2
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.cache.expiry, ExpiryPolicy::Lazy);
        assert_eq!(config.cache.ttl_secs, 3600); // default preserved
        assert_eq!(config.defaults.bar_weight, 35);
        assert_eq!(
            config.defaults.plates,
            PlateCounts::empty()
                .with(Denomination::FortyFives, 4)
                .with(Denomination::Tens, 2)
        );
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_unservable_values() {
        let mut negative_bar = Config::default();
        negative_bar.defaults.bar_weight = -10;
        assert!(negative_bar.validate().unwrap_err().contains("bar_weight"));

        let mut bad_format = Config::default();
        bad_format.general.log_format = "yaml".to_string();
        assert!(bad_format.validate().unwrap_err().contains("log_format"));

        let mut no_host = Config::default();
        no_host.server.host = " ".to_string();
        assert!(no_host.validate().unwrap_err().contains("host"));
    }

    #[test]
    fn config_rejects_unknown_expiry() {
        let result: Result<Config, _> = toml::from_str("[cache]\nexpiry = \"eager\"");
        assert!(result.is_err());
    }
}
