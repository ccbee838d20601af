//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// Upper bound for `NOTIFICATION_TTL_MS` (one hour).
const MAX_NOTIFICATION_TTL_MS: u64 = 60 * 60 * 1000;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub notification_ttl: Duration,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // --- Journal Settings ---
        let ttl_str = lookup("NOTIFICATION_TTL_MS").unwrap_or_else(|| "5000".to_string());
        let ttl_ms = ttl_str.trim().parse::<u64>().map_err(|e| {
            ConfigError::InvalidValue("NOTIFICATION_TTL_MS".to_string(), e.to_string())
        })?;
        if ttl_ms == 0 || ttl_ms > MAX_NOTIFICATION_TTL_MS {
            return Err(ConfigError::InvalidValue(
                "NOTIFICATION_TTL_MS".to_string(),
                format!("must be between 1 and {}", MAX_NOTIFICATION_TTL_MS),
            ));
        }

        Ok(Self {
            bind_address,
            log_level,
            notification_ttl: Duration::from_millis(ttl_ms),
            cors_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.notification_ttl, Duration::from_millis(5000));
        assert_eq!(config.cors_origin, "http://localhost:5173");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
            ("NOTIFICATION_TTL_MS", "2500"),
        ])
        .unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.notification_ttl, Duration::from_millis(2500));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config_from(&[("NOTIFICATION_TTL_MS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "NOTIFICATION_TTL_MS"));

        let err = config_from(&[("NOTIFICATION_TTL_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "NOTIFICATION_TTL_MS"));

        let err = config_from(&[("BIND_ADDRESS", "not an address")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "BIND_ADDRESS"));

        let err = config_from(&[("RUST_LOG", "chatty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "RUST_LOG"));
    }
}
