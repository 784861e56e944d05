//! Weather CLI Entry Point
//!
//! Wires configuration, the session controller and the weather client
//! together. Uses `anyhow` for startup errors, but command errors are
//! rendered through `kernel::error::AppError`.

mod cli;
mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use auth::{AuthConfig, LocalCredentialStore, Route, SessionController};
use clap::Parser;
use platform::{ClientConfig, FileStore, ReqwestTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather::WeatherClient;

use crate::cli::Cli;
use crate::commands::App;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "weather_cli=info,auth=info,weather=info,platform=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("invalid configuration")?;
    tracing::debug!(
        api = %config.api_base_url,
        storage = %config.storage_path.display(),
        "Configuration loaded"
    );

    let transport = Arc::new(ReqwestTransport::from_config(&config).context("HTTP client setup failed")?);
    let backend = FileStore::open(&config.storage_path).context("session storage unavailable")?;
    let store = Arc::new(LocalCredentialStore::new(backend));

    let session = SessionController::new(
        transport,
        store,
        Arc::new(|route: Route| tracing::info!(route = route.as_str(), "Navigate")),
        AuthConfig::default(),
    );
    let weather = WeatherClient::new(session.dispatcher());

    let app = App {
        config,
        session,
        weather,
    };

    match commands::run(&app, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
