//! External API integrations

use std::future::Future;

use shared::{AdvicePayload, Coordinate, Crop, DailyForecast};

use crate::error::AppResult;

pub mod advice;
pub mod weather;

pub use advice::AdviceClient;
pub use weather::WeatherClient;

/// Anything that can answer an advice request
pub trait AdviceSource {
    fn fetch_advice(
        &self,
        coordinate: Coordinate,
        crop: Crop,
        user_id: &str,
    ) -> impl Future<Output = AppResult<AdvicePayload>> + Send;
}

/// Anything that can produce the daily forecast for a location
pub trait ForecastSource {
    fn fetch_forecast(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = AppResult<Vec<DailyForecast>>> + Send;
}
