//! Application settings loaded from config.toml
//!
//! Settings are optional: a missing file yields the defaults, while a file that
//! exists but cannot be parsed is a configuration error. A few values can be
//! overridden from the environment (which `dotenvy` may have populated from `.env`).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the settings file
pub const CONFIG_PATH_VAR: &str = "CAR_GARAGE_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Identity header settings
    pub auth: AuthConfig,
}

/// Where the HTTP server listens
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// How the authenticated user is identified on incoming requests
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    /// Header carrying the user id, set by the fronting auth proxy
    pub user_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_header: "x-user-id".to_string(),
        }
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML syntax is invalid or a value has the wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file, falling back to defaults when the file is absent.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Applies `CAR_GARAGE_HOST` / `CAR_GARAGE_PORT` overrides.
///
/// # Errors
/// Returns [`Error::Config`] if `CAR_GARAGE_PORT` is not a valid port number.
pub fn apply_env_overrides(mut config: AppConfig) -> Result<AppConfig> {
    if let Ok(host) = std::env::var("CAR_GARAGE_HOST") {
        config.server.host = host;
    }
    if let Ok(port) = std::env::var("CAR_GARAGE_PORT") {
        config.server.port = port.parse().map_err(|e| Error::Config {
            message: format!("Invalid CAR_GARAGE_PORT {port:?}: {e}"),
        })?;
    }
    Ok(config)
}

/// Loads settings from the path in `CAR_GARAGE_CONFIG` (default `./config.toml`)
/// and applies environment overrides.
///
/// # Errors
/// Returns an error if the file cannot be parsed or an override is invalid.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    let config = load_config(&path)?;
    apply_env_overrides(config)
}
