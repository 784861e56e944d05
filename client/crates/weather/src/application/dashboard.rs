//! City Dashboard
//!
//! Aggregates everything the dashboard shows for one city and keeps it
//! fresh on a fixed period.

use std::sync::Arc;
use std::time::Duration;

use auth::CredentialStore;
use kernel::id::PollerId;
use platform::{HttpTransport, PollHandle, Poller};

use crate::application::client::WeatherClient;
use crate::domain::entities::{Alert, DailySummary, ForecastData, WeatherData};
use crate::domain::value_objects::CityId;
use crate::error::WeatherResult;

/// Snapshot of one city's dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct CityDashboard {
    pub city_id: CityId,
    pub latest: WeatherData,
    pub daily_summaries: Vec<DailySummary>,
    pub alerts: Vec<Alert>,
    pub forecast: Vec<ForecastData>,
}

impl<T, S> WeatherClient<T, S>
where
    T: HttpTransport + Send + Sync + 'static,
    S: CredentialStore + 'static,
{
    /// Latest observation first, then summaries, alerts and forecast
    /// concurrently
    ///
    /// Any failure fails the whole snapshot.
    pub async fn load_city_dashboard(&self, city_id: CityId) -> WeatherResult<CityDashboard> {
        let latest = self.fetch_latest_weather_by_city(city_id).await?;

        let (daily_summaries, alerts, forecast) = tokio::join!(
            self.fetch_daily_summaries(Some(city_id)),
            self.fetch_alerts(Some(city_id)),
            self.fetch_forecast(Some(city_id)),
        );

        let dashboard = CityDashboard {
            city_id,
            latest,
            daily_summaries: daily_summaries?,
            alerts: alerts?,
            forecast: forecast?,
        };
        tracing::debug!(
            city_id = %city_id,
            summaries = dashboard.daily_summaries.len(),
            alerts = dashboard.alerts.len(),
            forecast = dashboard.forecast.len(),
            "Dashboard loaded"
        );
        Ok(dashboard)
    }
}

// ============================================================================
// Periodic refresh
// ============================================================================

/// Receiver of dashboard snapshots
pub trait DashboardSink: Send + Sync + 'static {
    fn deliver(&self, update: WeatherResult<CityDashboard>);
}

impl<F> DashboardSink for F
where
    F: Fn(WeatherResult<CityDashboard>) + Send + Sync + 'static,
{
    fn deliver(&self, update: WeatherResult<CityDashboard>) {
        self(update)
    }
}

/// Running dashboard refresh for one city
///
/// Loads immediately, then once per interval. Stopping or dropping it
/// stops the polling; no request is issued afterwards.
#[derive(Debug)]
pub struct DashboardRefresher {
    city_id: CityId,
    handle: PollHandle,
}

impl DashboardRefresher {
    pub fn start<T, S, K>(
        client: WeatherClient<T, S>,
        city_id: CityId,
        interval: Duration,
        sink: K,
    ) -> Self
    where
        T: HttpTransport + Send + Sync + 'static,
        S: CredentialStore + 'static,
        K: DashboardSink,
    {
        let client = Arc::new(client);
        let sink = Arc::new(sink);

        let handle = Poller::spawn(interval, move || {
            let client = Arc::clone(&client);
            let sink = Arc::clone(&sink);
            async move {
                let update = client.load_city_dashboard(city_id).await;
                if let Err(e) = &update {
                    e.log();
                }
                sink.deliver(update);
            }
        });

        tracing::info!(
            city_id = %city_id,
            poller_id = %handle.id(),
            interval_secs = interval.as_secs(),
            "Dashboard refresh started"
        );
        Self { city_id, handle }
    }

    pub fn city_id(&self) -> CityId {
        self.city_id
    }

    pub fn poller_id(&self) -> PollerId {
        self.handle.id()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn stop(&self) {
        self.handle.stop();
    }
}
