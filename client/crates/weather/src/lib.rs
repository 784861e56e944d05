//! Weather Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Weather records, ids, temperature unit
//! - `application/` - Weather client, dashboard aggregation and refresh
//! - `infra/` - Endpoint request builders, list normalization
//!
//! ## Session Model
//! - Every call is routed through `auth::RequestDispatcher`: bearer token
//!   attached, one refresh-and-retry on 401
//! - A refresh failure surfaces as `WeatherError::Auth(SessionExpired)`
//!   after the session has already been ended

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use application::{CityDashboard, DashboardRefresher, DashboardSink, WeatherClient, WeatherConfig};
pub use domain::{
    Alert, City, CityId, DailySummary, ForecastData, NewCity, TempUnit, Threshold, ThresholdId,
    ThresholdInput, UserPreference, WeatherData, WeatherDataQuery,
};
pub use error::{WeatherError, WeatherResult};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
