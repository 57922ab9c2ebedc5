//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPWISE_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPWISE_PORT` - Listen port (default: 3000)
//! - `SHOPWISE_DATASET` - Path to a YAML dataset loaded at startup
//! - `SHOPWISE_SEED` - Load the built-in seed dataset when no path is set
//!   (default: false)
//! - `SHOPWISE_TODAY` - Pin report dates to this day (YYYY-MM-DD) instead of
//!   the system clock
//! - `SHOPWISE_LOG_JSON` - Emit JSON logs (default: false)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Rows the store starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Four empty tables.
    Empty,
    /// The built-in seed dataset.
    Sample,
    /// A YAML dataset file.
    File(PathBuf),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Initial store contents
    pub dataset: DatasetSource,
    /// Fixed report date, if pinned
    pub today: Option<NaiveDate>,
    /// JSON log output
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = get("SHOPWISE_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|e| invalid("SHOPWISE_HOST", &e))?;
        let port = get("SHOPWISE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| invalid("SHOPWISE_PORT", &e))?;

        let seed = get("SHOPWISE_SEED")
            .map(|value| parse_bool("SHOPWISE_SEED", &value))
            .transpose()?
            .unwrap_or(false);
        let dataset = match get("SHOPWISE_DATASET") {
            Some(path) => DatasetSource::File(PathBuf::from(path)),
            None if seed => DatasetSource::Sample,
            None => DatasetSource::Empty,
        };

        let today = get("SHOPWISE_TODAY")
            .map(|value| {
                NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                    .map_err(|e| invalid("SHOPWISE_TODAY", &e))
            })
            .transpose()?;

        let log_json = get("SHOPWISE_LOG_JSON")
            .map(|value| parse_bool("SHOPWISE_LOG_JSON", &value))
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            dataset,
            today,
            log_json,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn invalid(key: &str, err: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {other:?}"),
        )),
    }
}
