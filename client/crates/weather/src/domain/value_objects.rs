//! Domain Value Objects
//!
//! Identifiers and the temperature unit preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

numeric_id!(
    /// Server-assigned city id
    CityId
);
numeric_id!(
    /// Server-assigned threshold id
    ThresholdId
);
numeric_id!(AlertId);
numeric_id!(WeatherDataId);
numeric_id!(SummaryId);
numeric_id!(ForecastId);

// ============================================================================
// Temperature unit
// ============================================================================

/// Display unit for temperatures
///
/// Every temperature the API returns is Celsius; conversion happens only
/// when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    /// Convert a Celsius reading into this unit
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }

    /// Wire name used by the preferences endpoint
    pub fn as_str(self) -> &'static str {
        match self {
            TempUnit::Celsius => "Celsius",
            TempUnit::Fahrenheit => "Fahrenheit",
        }
    }

    /// Render a Celsius reading with one decimal and the unit symbol
    pub fn format(self, celsius: f64) -> String {
        format!("{:.1}{}", self.convert(celsius), self.symbol())
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown temperature unit name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown temperature unit: {0} (expected Celsius or Fahrenheit)")]
pub struct UnknownTempUnit(pub String);

impl FromStr for TempUnit {
    type Err = UnknownTempUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "celsius" | "c" => Ok(TempUnit::Celsius),
            "fahrenheit" | "f" => Ok(TempUnit::Fahrenheit),
            _ => Err(UnknownTempUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert() {
        assert_eq!(TempUnit::Celsius.convert(21.5), 21.5);
        assert_eq!(TempUnit::Fahrenheit.convert(0.0), 32.0);
        assert_eq!(TempUnit::Fahrenheit.convert(100.0), 212.0);
        assert_eq!(TempUnit::Fahrenheit.convert(-40.0), -40.0);
    }

    #[test]
    fn test_default_is_celsius() {
        assert_eq!(TempUnit::default(), TempUnit::Celsius);
    }

    #[test]
    fn test_format() {
        assert_eq!(TempUnit::Celsius.format(21.24), "21.2°C");
        assert_eq!(TempUnit::Fahrenheit.format(25.0), "77.0°F");
    }

    #[test]
    fn test_parse() {
        assert_eq!("fahrenheit".parse::<TempUnit>(), Ok(TempUnit::Fahrenheit));
        assert_eq!(" C ".parse::<TempUnit>(), Ok(TempUnit::Celsius));
        assert!("kelvin".parse::<TempUnit>().is_err());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&TempUnit::Fahrenheit).unwrap(),
            r#""Fahrenheit""#
        );
        assert!(serde_json::from_str::<TempUnit>(r#""fahrenheit""#).is_err());
    }

    #[test]
    fn test_id_is_transparent() {
        let id: CityId = serde_json::from_str("7").unwrap();
        assert_eq!(id, CityId::new(7));
        assert_eq!(id.to_string(), "7");
        assert_eq!("12".parse::<CityId>().unwrap().get(), 12);
    }
}
