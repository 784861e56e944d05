//! Domain Layer - Weather records
//!
//! This layer contains:
//! - Domain entities (City, WeatherData, DailySummary, ForecastData, Alert, Threshold)
//! - Domain value objects (ids, TempUnit)

pub mod entities;
pub mod value_objects;

pub use entities::{
    Alert, AlertOwner, City, DailySummary, ForecastData, NewCity, Threshold, ThresholdInput,
    UserPreference, WeatherData, WeatherDataQuery,
};
pub use value_objects::{
    AlertId, CityId, ForecastId, SummaryId, TempUnit, ThresholdId, UnknownTempUnit, WeatherDataId,
};
