//! HTTP Server Configuration
//!
//! Bind address and database settings, read once at process start.

use std::env;

use thiserror::Error;

use crate::catalog::EnvStatus;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";
pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which store backend to open at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB, when both database settings are present
    #[default]
    Mongo,
    /// In-process store; data is lost on exit
    Memory,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 8000)
    pub port: u16,

    /// MongoDB connection string
    pub database_url: Option<String>,

    /// MongoDB database name
    pub database_name: Option<String>,

    pub backend: StoreBackend,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            database_name: None,
            backend: StoreBackend::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using the given variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(host) = get(HOST_VAR) {
            config.host = host;
        }

        if let Some(port) = get(PORT_VAR) {
            config.port = port.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: PORT_VAR,
                    value: port.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        config.database_url = get(DATABASE_URL_VAR);
        config.database_name = get(DATABASE_NAME_VAR);

        Ok(config)
    }

    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection URL and database name, if both are configured
    pub fn database_settings(&self) -> Option<(&str, &str)> {
        match (&self.database_url, &self.database_name) {
            (Some(url), Some(name)) => Some((url.as_str(), name.as_str())),
            _ => None,
        }
    }

    /// Presence of the database settings, for diagnostics
    pub fn env_status(&self) -> EnvStatus {
        EnvStatus {
            database_url_set: self.database_url.is_some(),
            database_name_set: self.database_name.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert!(config.database_settings().is_none());
        assert_eq!(config.backend, StoreBackend::Mongo);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("DATABASE_NAME", "mufoods"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(
            config.database_settings(),
            Some(("mongodb://localhost:27017", "mufoods"))
        );
        assert_eq!(
            config.env_status(),
            EnvStatus {
                database_url_set: true,
                database_name_set: true
            }
        );
    }

    #[test]
    fn test_partial_database_settings() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "mongodb://x")])).unwrap();

        assert!(config.database_settings().is_none());
        assert!(config.env_status().database_url_set);
        assert!(!config.env_status().database_name_set);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_NAME", "")])).unwrap();
        assert!(!config.env_status().database_name_set);
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }
}
