//! Application Configuration
//!
//! Configuration for the weather application layer.

use std::time::Duration;

use platform::ClientConfig;

/// Weather application configuration
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Dashboard refresh period
    pub poll_interval: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(300),
        }
    }
}

impl From<&ClientConfig> for WeatherConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
        }
    }
}
