//! Environment configuration helpers

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error raised when an environment variable holds an unusable value
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {key}: {value:?} ({reason})")]
pub struct EnvError {
    /// Variable name
    pub key: String,
    /// Raw value found in the environment
    pub value: String,
    /// Parser message
    pub reason: String,
}

/// Application metadata shared by the binary and the HTTP service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    /// Application name
    pub app_name: String,
    /// Crate version reported by the health endpoint
    pub version: String,
    /// Environment (development, production, ...)
    pub environment: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            app_name: "signal-desk".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

impl AppInfo {
    /// Defaults with `APP_ENV` applied
    pub fn from_env() -> Self {
        Self {
            environment: env_or("APP_ENV", "development"),
            ..Self::default()
        }
    }
}

/// Read a variable, treating unset and blank values as absent
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable or fall back to `default`
pub fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Read and parse a variable; `Ok(None)` when it is unset
pub fn env_parse<T>(key: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key).map(|raw| parse_value(key, &raw)).transpose()
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| EnvError {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
