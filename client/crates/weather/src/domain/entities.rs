//! Domain Entities
//!
//! Records returned by the weather API. All temperatures are Celsius,
//! wind speeds km/h, humidity percent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    AlertId, CityId, ForecastId, SummaryId, TempUnit, ThresholdId, WeatherDataId,
};

/// City - a monitored location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub country_code: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Meters
    #[serde(default)]
    pub altitude: Option<f64>,
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country_code)
    }
}

/// WeatherData - one observation for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub id: WeatherDataId,
    pub city: City,
    pub timestamp: DateTime<Utc>,
    /// Condition, e.g. `Clear`, `Rain`
    pub main: String,
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

/// DailySummary - per-day aggregate for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub id: SummaryId,
    pub city: City,
    pub date: NaiveDate,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    #[serde(default = "unknown_condition")]
    pub dominant_condition: String,
    #[serde(default)]
    pub dominant_reasoning: String,
}

fn unknown_condition() -> String {
    "Unknown".to_string()
}

/// ForecastData - predicted conditions at a future instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub id: ForecastId,
    pub city: City,
    pub timestamp: DateTime<Utc>,
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    pub main: String,
    #[serde(default)]
    pub description: String,
}

/// Account that owns an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertOwner {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Alert - raised by the server when a threshold is breached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    #[serde(default)]
    pub user: Option<AlertOwner>,
    pub city: City,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

/// Threshold - alert condition configured by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub id: ThresholdId,
    pub city: City,
    #[serde(default)]
    pub temp_threshold: Option<f64>,
    #[serde(default)]
    pub condition_threshold: Option<String>,
    /// Consecutive breaching observations before an alert fires
    pub consecutive_updates: u32,
}

/// UserPreference - per-account display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPreference {
    #[serde(default)]
    pub temp_unit: TempUnit,
}

// ============================================================================
// Inputs
// ============================================================================

/// Maximum city name length accepted by the server
pub const CITY_NAME_MAX_LENGTH: usize = 100;
/// Maximum country code length accepted by the server
pub const COUNTRY_CODE_MAX_LENGTH: usize = 4;

/// New city to register for monitoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCity {
    pub name: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl NewCity {
    pub fn new(name: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country_code: country_code.into(),
            latitude: None,
            longitude: None,
            altitude: None,
        }
    }

    /// Trim fields and check the limits the server enforces
    pub fn validate(mut self) -> Result<Self, String> {
        self.name = self.name.trim().to_string();
        self.country_code = self.country_code.trim().to_uppercase();

        if self.name.is_empty() {
            return Err("City name is required.".to_string());
        }
        if self.name.chars().count() > CITY_NAME_MAX_LENGTH {
            return Err(format!(
                "City name must be at most {CITY_NAME_MAX_LENGTH} characters."
            ));
        }
        if self.country_code.is_empty() {
            return Err("Country code is required.".to_string());
        }
        if self.country_code.chars().count() > COUNTRY_CODE_MAX_LENGTH {
            return Err(format!(
                "Country code must be at most {COUNTRY_CODE_MAX_LENGTH} characters."
            ));
        }
        Ok(self)
    }
}

/// Body for creating or replacing a threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdInput {
    pub city_id: CityId,
    pub temp_threshold: Option<f64>,
    pub condition_threshold: Option<String>,
    pub consecutive_updates: u32,
}

impl ThresholdInput {
    pub fn new(city_id: CityId) -> Self {
        Self {
            city_id,
            temp_threshold: None,
            condition_threshold: None,
            consecutive_updates: 1,
        }
    }

    /// At least one condition, and a positive breach count
    pub fn validate(mut self) -> Result<Self, String> {
        self.condition_threshold = self
            .condition_threshold
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        if self.temp_threshold.is_none() && self.condition_threshold.is_none() {
            return Err("Set a temperature or a condition threshold.".to_string());
        }
        if self.temp_threshold.is_some_and(|t| !t.is_finite()) {
            return Err("Temperature threshold must be a number.".to_string());
        }
        if self.consecutive_updates == 0 {
            return Err("Consecutive updates must be at least 1.".to_string());
        }
        Ok(self)
    }
}

/// Filter for the raw weather data listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeatherDataQuery {
    pub city: Option<CityId>,
    pub page: Option<u32>,
}

impl WeatherDataQuery {
    pub fn for_city(city: CityId) -> Self {
        Self {
            city: Some(city),
            page: None,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}
