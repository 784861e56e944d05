//! Client Configuration
//!
//! Environment-driven settings shared by every crate in the client.

use std::path::PathBuf;
use std::time::Duration;

use kernel::error::{app_error::AppError, kind::ErrorKind};

pub const ENV_API_URL: &str = "WEATHER_API_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "WEATHER_REQUEST_TIMEOUT_SECS";
pub const ENV_STORAGE_PATH: &str = "WEATHER_STORAGE_PATH";
pub const ENV_POLL_INTERVAL_SECS: &str = "WEATHER_POLL_INTERVAL_SECS";

const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
const APP_DIR_NAME: &str = "weather-monitor";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be an http(s) URL, got {value:?}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("No configuration directory available; set {0}")]
    NoStorageDir(&'static str),
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
            .with_action("Check the WEATHER_* environment variables or your .env file")
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API base URL, always ending with `/`
    pub api_base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Where the session keys are persisted
    pub storage_path: PathBuf,
    /// Dashboard refresh period
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            storage_path: PathBuf::from(SESSION_FILE_NAME),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = match read(ENV_API_URL) {
            Some(url) => normalize_base_url(ENV_API_URL, &url)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let request_timeout = Duration::from_secs(match read(ENV_REQUEST_TIMEOUT_SECS) {
            Some(v) => parse_secs(ENV_REQUEST_TIMEOUT_SECS, &v)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        });

        let poll_interval = Duration::from_secs(match read(ENV_POLL_INTERVAL_SECS) {
            Some(v) => parse_secs(ENV_POLL_INTERVAL_SECS, &v)?,
            None => DEFAULT_POLL_INTERVAL_SECS,
        });

        let storage_path = match read(ENV_STORAGE_PATH) {
            Some(path) => PathBuf::from(path),
            None => default_storage_path()?,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            storage_path,
            poll_interval,
        })
    }
}

fn default_storage_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(SESSION_FILE_NAME))
        .ok_or(ConfigError::NoStorageDir(ENV_STORAGE_PATH))
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        }),
    }
}

fn normalize_base_url(key: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl {
            key,
            value: value.to_string(),
        });
    }

    // Url::join drops the last segment unless the base ends with a slash
    if value.ends_with('/') {
        Ok(value.to_string())
    } else {
        Ok(format!("{value}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_STORAGE_PATH, "/tmp/s.json")])).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8000/api/v1/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.poll_interval, Duration::from_secs(300));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://weather.example.com/api/v1"),
            (ENV_STORAGE_PATH, "/tmp/s.json"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://weather.example.com/api/v1/");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = ClientConfig::from_lookup(lookup(&[
            (ENV_REQUEST_TIMEOUT_SECS, "soon"),
            (ENV_STORAGE_PATH, "/tmp/s.json"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));

        let result = ClientConfig::from_lookup(lookup(&[
            (ENV_POLL_INTERVAL_SECS, "0"),
            (ENV_STORAGE_PATH, "/tmp/s.json"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));

        let result = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "localhost:8000"),
            (ENV_STORAGE_PATH, "/tmp/s.json"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "  "),
            (ENV_STORAGE_PATH, "/tmp/s.json"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_error_maps_to_configuration_kind() {
        let err = ConfigError::NoStorageDir(ENV_STORAGE_PATH);
        assert_eq!(err.to_app_error().kind(), ErrorKind::Configuration);
    }
}
