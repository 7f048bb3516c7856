//! Weather API client for fetching forecast data
//!
//! Integrates with the Open-Meteo hourly forecast API and folds the hourly
//! samples into daily summaries.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{Coordinate, DailyAggregator, DailyForecast, HourlySeries};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::external::ForecastSource;

/// Hourly variables requested from the forecast service
pub const HOURLY_FIELDS: &str = "temperature_2m,precipitation,relative_humidity_2m";

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    aggregator: DailyAggregator,
}

#[derive(Debug, Serialize)]
struct ForecastQuery<'a> {
    latitude: f64,
    longitude: f64,
    hourly: &'a str,
}

/// Open-Meteo response for an hourly forecast
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlySeries>,
}

impl WeatherClient {
    /// Create a new WeatherClient against the given forecast URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            aggregator: DailyAggregator::default(),
        }
    }

    /// Create a client that gives up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build weather client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            aggregator: DailyAggregator::default(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> AppResult<Self> {
        Self::with_timeout(config.endpoint.clone(), config.timeout())
    }

    /// Replace the default first-seen, seven-day aggregation
    pub fn with_aggregator(mut self, aggregator: DailyAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Fetch hourly data for a coordinate and summarize it per day
    pub async fn fetch_forecast(&self, coordinate: Coordinate) -> AppResult<Vec<DailyForecast>> {
        let query = ForecastQuery {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            hourly: HOURLY_FIELDS,
        };
        tracing::debug!(
            "GET {} lat={} lon={}",
            self.base_url,
            coordinate.latitude,
            coordinate.longitude
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::WeatherRequestFailed(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherRequestFailed(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: ForecastResponse = response.json().await.map_err(|e| {
            AppError::WeatherRequestFailed(format!("Failed to parse forecast response: {}", e))
        })?;

        let hourly = data.hourly.ok_or_else(|| {
            AppError::WeatherRequestFailed("Forecast response has no hourly data".to_string())
        })?;

        let days = self.aggregator.aggregate(&hourly);
        tracing::debug!("Aggregated {} hourly samples into {} days", hourly.time.len(), days.len());

        Ok(days)
    }
}

impl ForecastSource for WeatherClient {
    async fn fetch_forecast(&self, coordinate: Coordinate) -> AppResult<Vec<DailyForecast>> {
        WeatherClient::fetch_forecast(self, coordinate).await
    }
}
