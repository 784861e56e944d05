//! Command handlers
//!
//! Each handler returns `AppError` so failures render the same way
//! regardless of which crate produced them.

use std::io::{self, BufRead, Write};

use auth::{AuthState, LocalCredentialStore, RegistrationForm, SessionController, SignInInput};
use kernel::error::app_error::AppError;
use platform::{ClientConfig, FileStore, ReqwestTransport};
use tokio::sync::mpsc;
use weather::{
    CityDashboard, CityId, DashboardRefresher, NewCity, TempUnit, ThresholdInput, WeatherClient,
    WeatherResult,
};

use crate::cli::{CityAction, Command, ThresholdAction, ThresholdRule};

pub type Store = LocalCredentialStore<FileStore>;

/// Everything a command needs
pub struct App {
    pub config: ClientConfig,
    pub session: SessionController<ReqwestTransport, Store>,
    pub weather: WeatherClient<ReqwestTransport, Store>,
}

impl App {
    /// Fail early with a hint instead of sending a request the server
    /// will refuse
    fn require_session(&self) -> Result<(), AppError> {
        match self.session.initialize() {
            AuthState::Authenticated(_) => Ok(()),
            _ => Err(AppError::unauthorized("Not signed in")
                .with_action("Run `weather-cli login --username <name>`")),
        }
    }

    /// The account's unit, Celsius if it cannot be read
    async fn temp_unit(&self) -> TempUnit {
        match self.weather.fetch_preferences().await {
            Ok(preference) => preference.temp_unit,
            Err(e) => {
                e.log();
                TempUnit::default()
            }
        }
    }
}

pub async fn run(app: &App, command: Command) -> Result<(), AppError> {
    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => read_secret("Password: ")?,
            };
            let identity = app.session.login(SignInInput { username, password }).await?;
            println!("Logged in as {identity}");
        }
        Command::Register {
            username,
            email,
            password,
            confirm,
        } => {
            let password = match password {
                Some(p) => p,
                None => read_secret("Password: ")?,
            };
            let password_confirmation = match confirm {
                Some(p) => p,
                None => read_secret("Confirm password: ")?,
            };
            let form = RegistrationForm {
                username,
                email,
                password,
                password_confirmation,
            };
            let identity = app.session.register(form).await?;
            println!("Registered and logged in as {identity}");
        }
        Command::Logout => {
            app.session.logout();
            println!("Logged out");
        }
        Command::Status => match app.session.initialize() {
            AuthState::Authenticated(identity) => println!("Signed in as {identity}"),
            _ => println!("Not signed in"),
        },
        Command::Cities { action } => {
            app.require_session()?;
            cities(app, action).await?;
        }
        Command::Dashboard { city_id, watch } => {
            app.require_session()?;
            let unit = app.temp_unit().await;
            if watch {
                watch_dashboard(app, city_id, unit).await?;
            } else {
                let dashboard = app.weather.load_city_dashboard(city_id).await?;
                print_dashboard(&dashboard, unit);
            }
        }
        Command::Thresholds { action } => {
            app.require_session()?;
            thresholds(app, action).await?;
        }
        Command::Preferences { unit } => {
            app.require_session()?;
            let preference = match unit {
                Some(unit) => app.weather.update_preferences(unit).await?,
                None => app.weather.fetch_preferences().await?,
            };
            println!("Temperature unit: {}", preference.temp_unit);
        }
    }
    Ok(())
}

async fn cities(app: &App, action: Option<CityAction>) -> Result<(), AppError> {
    match action {
        None => {
            let cities = app.weather.fetch_cities().await?;
            if cities.is_empty() {
                println!("No cities are monitored yet");
            }
            for city in cities {
                println!("{:>4}  {city}", city.id);
            }
        }
        Some(CityAction::Add {
            name,
            country_code,
            latitude,
            longitude,
        }) => {
            let mut city = NewCity::new(name, country_code);
            city.latitude = latitude;
            city.longitude = longitude;
            let city = app.weather.add_city(city).await?;
            println!("Added {city} (id {})", city.id);
        }
        Some(CityAction::Delete { id }) => {
            app.weather.delete_city(id).await?;
            println!("Deleted city {id}");
        }
    }
    Ok(())
}

async fn thresholds(app: &App, action: Option<ThresholdAction>) -> Result<(), AppError> {
    match action {
        None => {
            let unit = app.temp_unit().await;
            let thresholds = app.weather.fetch_thresholds().await?;
            if thresholds.is_empty() {
                println!("No thresholds configured");
            }
            for t in thresholds {
                let temp = t
                    .temp_threshold
                    .map(|c| format!("above {}", unit.format(c)))
                    .unwrap_or_default();
                let condition = t.condition_threshold.unwrap_or_default();
                println!(
                    "{:>4}  {}  {temp} {condition}  after {} update(s)",
                    t.id, t.city, t.consecutive_updates
                );
            }
        }
        Some(ThresholdAction::Add { city_id, rule }) => {
            let created = app.weather.create_threshold(threshold_input(city_id, rule)).await?;
            println!("Created threshold {} for {}", created.id, created.city);
        }
        Some(ThresholdAction::Update { id, city_id, rule }) => {
            let updated = app
                .weather
                .update_threshold(id, threshold_input(city_id, rule))
                .await?;
            println!("Updated threshold {}", updated.id);
        }
        Some(ThresholdAction::Delete { id }) => {
            app.weather.delete_threshold(id).await?;
            println!("Deleted threshold {id}");
        }
    }
    Ok(())
}

fn threshold_input(city_id: CityId, rule: ThresholdRule) -> ThresholdInput {
    ThresholdInput {
        city_id,
        temp_threshold: rule.temp,
        condition_threshold: rule.condition,
        consecutive_updates: rule.consecutive,
    }
}

/// Refresh until interrupted or the session ends
async fn watch_dashboard(app: &App, city_id: CityId, unit: TempUnit) -> Result<(), AppError> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let refresher = DashboardRefresher::start(
        app.weather.clone(),
        city_id,
        app.config.poll_interval,
        move |update: WeatherResult<CityDashboard>| {
            let _ = tx.send(update);
        },
    );

    let mut auth_state = app.session.subscribe();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = loop {
        tokio::select! {
            Some(update) = rx.recv() => match update {
                Ok(dashboard) => print_dashboard(&dashboard, unit),
                Err(e) if e.is_session_expired() => break Err(e.into()),
                Err(e) => eprintln!("{}", e.to_app_error()),
            },
            changed = auth_state.changed() => {
                if changed.is_err() || !auth_state.borrow().is_authenticated() {
                    break Ok(());
                }
            }
            _ = &mut ctrl_c => break Ok(()),
        }
    };

    refresher.stop();
    outcome
}

fn print_dashboard(dashboard: &CityDashboard, unit: TempUnit) {
    let latest = &dashboard.latest;
    println!(
        "{}  {}",
        latest.city,
        latest.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  {}  {} (feels like {})",
        latest.main,
        unit.format(latest.temp),
        unit.format(latest.feels_like)
    );
    if let Some(humidity) = latest.humidity {
        println!("  Humidity {humidity:.0}%");
    }
    if let Some(wind) = latest.wind_speed {
        println!("  Wind {wind:.1} km/h");
    }

    println!("Daily summaries:");
    for s in &dashboard.daily_summaries {
        println!(
            "  {}  avg {}  max {}  min {}  {}",
            s.date,
            unit.format(s.avg_temp),
            unit.format(s.max_temp),
            unit.format(s.min_temp),
            s.dominant_condition
        );
    }

    println!("Alerts:");
    if dashboard.alerts.is_empty() {
        println!("  none");
    }
    for a in &dashboard.alerts {
        println!("  {}  {}", a.created_at.format("%Y-%m-%d %H:%M"), a.message);
    }

    println!("Forecast:");
    for f in &dashboard.forecast {
        println!(
            "  {}  {}  {}",
            f.timestamp.format("%Y-%m-%d %H:%M"),
            unit.format(f.temp),
            f.description
        );
    }
    println!();
}

/// Prompt on stderr and read one line from stdin
fn read_secret(prompt: &str) -> Result<String, AppError> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
