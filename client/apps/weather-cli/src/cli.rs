//! Command-line interface definition and argument parsing

use clap::{Parser, Subcommand};
use weather::{CityId, TempUnit, ThresholdId};

/// Command-line arguments for the weather monitor
#[derive(Parser, Debug)]
#[command(
    name = "weather-cli",
    about = "Terminal client for the weather monitoring API",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with username and password
    Login {
        #[arg(long, short)]
        username: String,

        /// Read from stdin when omitted
        #[arg(long, env = "WEATHER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and log in
    Register {
        #[arg(long, short)]
        username: String,

        #[arg(long, short)]
        email: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,

        /// Read from stdin when omitted
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show who is signed in
    Status,

    /// List, add or delete monitored cities
    Cities {
        #[command(subcommand)]
        action: Option<CityAction>,
    },

    /// Latest weather, summaries, alerts and forecast for one city
    Dashboard {
        city_id: CityId,

        /// Keep refreshing until interrupted
        #[arg(long)]
        watch: bool,
    },

    /// List or manage alert thresholds
    Thresholds {
        #[command(subcommand)]
        action: Option<ThresholdAction>,
    },

    /// Show or change the temperature unit
    Preferences {
        #[arg(long)]
        unit: Option<TempUnit>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CityAction {
    Add {
        name: String,

        #[arg(long, default_value = "IN")]
        country_code: String,

        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,
    },
    Delete {
        id: CityId,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThresholdAction {
    Add {
        city_id: CityId,

        #[command(flatten)]
        rule: ThresholdRule,
    },
    Update {
        id: ThresholdId,

        city_id: CityId,

        #[command(flatten)]
        rule: ThresholdRule,
    },
    Delete {
        id: ThresholdId,
    },
}

#[derive(clap::Args, Debug)]
pub struct ThresholdRule {
    /// Alert when the temperature exceeds this (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub temp: Option<f64>,

    /// Alert on this condition, e.g. Rain
    #[arg(long)]
    pub condition: Option<String>,

    /// Breaching updates in a row before alerting
    #[arg(long, default_value_t = 1)]
    pub consecutive: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dashboard_watch() {
        let cli = Cli::try_parse_from(["weather-cli", "dashboard", "3", "--watch"]).unwrap();
        match cli.command {
            Command::Dashboard { city_id, watch } => {
                assert_eq!(city_id, CityId::new(3));
                assert!(watch);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_threshold_add() {
        let cli = Cli::try_parse_from([
            "weather-cli", "thresholds", "add", "1", "--temp", "-5", "--consecutive", "2",
        ])
        .unwrap();
        match cli.command {
            Command::Thresholds {
                action: Some(ThresholdAction::Add { city_id, rule }),
            } => {
                assert_eq!(city_id, CityId::new(1));
                assert_eq!(rule.temp, Some(-5.0));
                assert_eq!(rule.consecutive, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_unit() {
        let cli = Cli::try_parse_from(["weather-cli", "preferences", "--unit", "f"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Preferences {
                unit: Some(TempUnit::Fahrenheit)
            }
        ));
        assert!(Cli::try_parse_from(["weather-cli", "preferences", "--unit", "kelvin"]).is_err());
    }
}
