//! Application Layer - Use Cases
//!
//! Typed API operations and the dashboard aggregation built on them.

pub mod client;
pub mod config;
pub mod dashboard;

pub use client::WeatherClient;
pub use config::WeatherConfig;
pub use dashboard::{CityDashboard, DashboardRefresher, DashboardSink};
