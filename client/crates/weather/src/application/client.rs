//! Weather Client
//!
//! Typed operations over the weather REST API. Every call goes through
//! the session's [`RequestDispatcher`], so it carries the bearer token and
//! gets one refresh-and-retry on 401.

use std::sync::Arc;

use auth::{CredentialStore, RequestDispatcher};
use platform::{ApiRequest, ApiResponse, HttpTransport};
use serde::de::DeserializeOwned;

use crate::domain::entities::{
    Alert, City, DailySummary, ForecastData, NewCity, Threshold, ThresholdInput, UserPreference,
    WeatherData, WeatherDataQuery,
};
use crate::domain::value_objects::{CityId, TempUnit, ThresholdId};
use crate::error::{WeatherError, WeatherResult};
use crate::infra::{endpoints, normalize};

/// Weather API client
pub struct WeatherClient<T, S>
where
    T: HttpTransport,
    S: CredentialStore,
{
    dispatcher: Arc<RequestDispatcher<T, S>>,
}

impl<T, S> WeatherClient<T, S>
where
    T: HttpTransport + Send + Sync + 'static,
    S: CredentialStore + 'static,
{
    pub fn new(dispatcher: Arc<RequestDispatcher<T, S>>) -> Self {
        Self { dispatcher }
    }

    // ========================================================================
    // Cities
    // ========================================================================

    pub async fn fetch_cities(&self) -> WeatherResult<Vec<City>> {
        self.fetch_list(endpoints::cities()).await
    }

    pub async fn add_city(&self, city: NewCity) -> WeatherResult<City> {
        let city = city.validate().map_err(WeatherError::InvalidInput)?;
        let created: City = self.fetch_one(endpoints::add_city(&city)?).await?;
        tracing::info!(city_id = %created.id, name = %created.name, "City added");
        Ok(created)
    }

    pub async fn delete_city(&self, id: CityId) -> WeatherResult<()> {
        self.send(endpoints::delete_city(id)).await?;
        tracing::info!(city_id = %id, "City deleted");
        Ok(())
    }

    // ========================================================================
    // Observations
    // ========================================================================

    pub async fn fetch_latest_weather_all_cities(&self) -> WeatherResult<Vec<WeatherData>> {
        self.fetch_list(endpoints::latest_weather_all_cities()).await
    }

    pub async fn fetch_weather_data(
        &self,
        query: WeatherDataQuery,
    ) -> WeatherResult<Vec<WeatherData>> {
        self.fetch_list(endpoints::weather_data(&query)).await
    }

    /// Most recent observation for `city`
    ///
    /// The server answers 404 when the city has no observations yet.
    pub async fn fetch_latest_weather_by_city(&self, city: CityId) -> WeatherResult<WeatherData> {
        self.fetch_one(endpoints::latest_weather(city)).await
    }

    pub async fn fetch_daily_summaries(
        &self,
        city: Option<CityId>,
    ) -> WeatherResult<Vec<DailySummary>> {
        self.fetch_list(endpoints::per_city(endpoints::DAILY_SUMMARIES, city))
            .await
    }

    pub async fn fetch_forecast(&self, city: Option<CityId>) -> WeatherResult<Vec<ForecastData>> {
        self.fetch_list(endpoints::per_city(endpoints::FORECAST, city))
            .await
    }

    pub async fn fetch_alerts(&self, city: Option<CityId>) -> WeatherResult<Vec<Alert>> {
        self.fetch_list(endpoints::per_city(endpoints::ALERTS, city))
            .await
    }

    // ========================================================================
    // Thresholds
    // ========================================================================

    pub async fn fetch_thresholds(&self) -> WeatherResult<Vec<Threshold>> {
        self.fetch_list(endpoints::thresholds()).await
    }

    pub async fn create_threshold(&self, input: ThresholdInput) -> WeatherResult<Threshold> {
        let input = input.validate().map_err(WeatherError::InvalidInput)?;
        let created: Threshold = self.fetch_one(endpoints::create_threshold(&input)?).await?;
        tracing::info!(threshold_id = %created.id, city_id = %input.city_id, "Threshold created");
        Ok(created)
    }

    pub async fn update_threshold(
        &self,
        id: ThresholdId,
        input: ThresholdInput,
    ) -> WeatherResult<Threshold> {
        let input = input.validate().map_err(WeatherError::InvalidInput)?;
        let updated = self
            .fetch_one(endpoints::update_threshold(id, &input)?)
            .await?;
        tracing::info!(threshold_id = %id, "Threshold updated");
        Ok(updated)
    }

    pub async fn delete_threshold(&self, id: ThresholdId) -> WeatherResult<()> {
        self.send(endpoints::delete_threshold(id)).await?;
        tracing::info!(threshold_id = %id, "Threshold deleted");
        Ok(())
    }

    // ========================================================================
    // Preferences
    // ========================================================================

    pub async fn fetch_preferences(&self) -> WeatherResult<UserPreference> {
        self.fetch_one(endpoints::preferences()).await
    }

    pub async fn update_preferences(&self, temp_unit: TempUnit) -> WeatherResult<UserPreference> {
        let request = endpoints::update_preferences(&UserPreference { temp_unit })?;
        let saved: UserPreference = self.fetch_one(request).await?;
        tracing::info!(temp_unit = %saved.temp_unit, "Preferences updated");
        Ok(saved)
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    /// Send and require a 2xx
    async fn send(&self, request: ApiRequest) -> WeatherResult<ApiResponse> {
        let method = request.method.clone();
        let path = request.path.clone();

        let response = self.dispatcher.send(request).await?;
        if !response.is_success() {
            let err = WeatherError::from_response(&response);
            tracing::debug!(%method, path = %path, status = response.status.as_u16(), "Weather request failed");
            return Err(err);
        }
        Ok(response)
    }

    async fn fetch_one<E: DeserializeOwned>(&self, request: ApiRequest) -> WeatherResult<E> {
        let response = self.send(request).await?;
        Ok(response.json()?)
    }

    async fn fetch_list<E: DeserializeOwned>(&self, request: ApiRequest) -> WeatherResult<Vec<E>> {
        let path = request.path.clone();
        let response = self.send(request).await?;
        let items = normalize::collection(&path, &response.body);
        tracing::debug!(path = %path, count = items.len(), "Weather list fetched");
        Ok(items)
    }
}

impl<T, S> Clone for WeatherClient<T, S>
where
    T: HttpTransport,
    S: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}
