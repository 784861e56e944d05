//! Weather Endpoints
//!
//! Request builders for the weather REST API. Every request here is an
//! authenticated one: the dispatcher attaches the bearer token.

use platform::ApiRequest;

use crate::domain::entities::{NewCity, ThresholdInput, UserPreference, WeatherDataQuery};
use crate::domain::value_objects::{CityId, ThresholdId};

pub const CITIES: &str = "cities/";
pub const CITY_ADD: &str = "city/add/";
pub const WEATHER_DATA: &str = "weather-data/";
pub const WEATHER_LATEST: &str = "weather-data/latest/";
pub const WEATHER_LATEST_ALL: &str = "weather-data/latest/all/";
pub const DAILY_SUMMARIES: &str = "daily-summaries/";
pub const FORECAST: &str = "forecast/";
pub const ALERTS: &str = "alerts/";
pub const THRESHOLDS: &str = "thresholds/";
pub const PREFERENCES: &str = "preferences/";

// ============================================================================
// Cities
// ============================================================================

pub fn cities() -> ApiRequest {
    ApiRequest::get(CITIES)
}

pub fn add_city(city: &NewCity) -> Result<ApiRequest, serde_json::Error> {
    ApiRequest::post(CITY_ADD).json(city)
}

pub fn delete_city(id: CityId) -> ApiRequest {
    ApiRequest::delete(format!("city/delete/{id}/"))
}

// ============================================================================
// Observations
// ============================================================================

pub fn latest_weather_all_cities() -> ApiRequest {
    ApiRequest::get(WEATHER_LATEST_ALL)
}

pub fn weather_data(query: &WeatherDataQuery) -> ApiRequest {
    let mut request = ApiRequest::get(WEATHER_DATA);
    if let Some(city) = query.city {
        request = request.query("city", city);
    }
    if let Some(page) = query.page {
        request = request.query("page", page);
    }
    request
}

pub fn latest_weather(city: CityId) -> ApiRequest {
    ApiRequest::get(WEATHER_LATEST).query("city", city)
}

/// `path`, narrowed to one city when given
pub fn per_city(path: &'static str, city: Option<CityId>) -> ApiRequest {
    let request = ApiRequest::get(path);
    match city {
        Some(city) => request.query("city", city),
        None => request,
    }
}

// ============================================================================
// Thresholds
// ============================================================================

pub fn thresholds() -> ApiRequest {
    ApiRequest::get(THRESHOLDS)
}

pub fn create_threshold(input: &ThresholdInput) -> Result<ApiRequest, serde_json::Error> {
    ApiRequest::post(THRESHOLDS).json(input)
}

pub fn update_threshold(
    id: ThresholdId,
    input: &ThresholdInput,
) -> Result<ApiRequest, serde_json::Error> {
    ApiRequest::put(threshold_path(id)).json(input)
}

pub fn delete_threshold(id: ThresholdId) -> ApiRequest {
    ApiRequest::delete(threshold_path(id))
}

fn threshold_path(id: ThresholdId) -> String {
    format!("{THRESHOLDS}{id}/")
}

// ============================================================================
// Preferences
// ============================================================================

pub fn preferences() -> ApiRequest {
    ApiRequest::get(PREFERENCES)
}

pub fn update_preferences(preference: &UserPreference) -> Result<ApiRequest, serde_json::Error> {
    ApiRequest::put(PREFERENCES).json(preference)
}
