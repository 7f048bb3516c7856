//! Dashboard state and the advice sequence that fills it
//!
//! One call to [`DashboardController::request_advice`] runs location →
//! advice → forecast and publishes the combined result in a single state
//! replacement. Overlapping calls are allowed; whichever finishes last wins.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use shared::{
    avatar_initial, AdvicePayload, Crop, DailyForecast, HistoryEntry, KeyValueStore, MemoryStore,
    RecommendationSet, SoilReading,
};

use crate::error::{AppError, AppResult};
use crate::external::{AdviceSource, ForecastSource};
use crate::services::geolocation::GeolocationSource;

/// Where the dashboard is in its request lifecycle
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Everything the dashboard renders
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewState {
    pub phase: DashboardPhase,
    pub county: String,
    pub soil_data: SoilReading,
    pub recommendations: RecommendationSet,
    pub weather_forecast: Vec<DailyForecast>,
    pub history: Vec<HistoryEntry>,
    pub total_rain: f64,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardViewState {
    fn begin(&mut self) {
        self.phase = DashboardPhase::Loading;
        self.loading = true;
        self.error = None;
    }

    /// Replace every data field with the latest responses
    fn publish(&mut self, advice: AdvicePayload, forecast: Vec<DailyForecast>) {
        *self = DashboardViewState {
            phase: DashboardPhase::Ready,
            county: advice.county,
            soil_data: advice.soil_data,
            recommendations: advice.recommendations,
            weather_forecast: forecast,
            history: advice.history,
            total_rain: advice.total_rain,
            loading: false,
            error: None,
        };
    }

    /// Keep the data on screen, show the error
    fn fail(&mut self, error: &AppError) {
        self.phase = DashboardPhase::Failed;
        self.loading = false;
        self.error = Some(error.to_string());
    }

    /// Result panels are only shown once a soil reading has arrived
    pub fn has_results(&self) -> bool {
        self.soil_data.is_measured()
    }
}

/// Owns the dashboard state and runs advice sequences against it
pub struct DashboardController<G, A, W> {
    geolocation: G,
    advice: A,
    weather: W,
    user_id: String,
    crop: Mutex<Crop>,
    state: Mutex<DashboardViewState>,
    store: Arc<dyn KeyValueStore + Send + Sync>,
}

impl<G, A, W> DashboardController<G, A, W>
where
    G: GeolocationSource,
    A: AdviceSource,
    W: ForecastSource,
{
    pub fn new(geolocation: G, advice: A, weather: W, user_id: impl Into<String>, crop: Crop) -> Self {
        Self {
            geolocation,
            advice,
            weather,
            user_id: user_id.into(),
            crop: Mutex::new(crop),
            state: Mutex::new(DashboardViewState::default()),
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Use `store` for the signed-in display name
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        self.store = store;
        self
    }

    /// Snapshot of the current state
    pub fn state(&self) -> DashboardViewState {
        self.lock_state().clone()
    }

    pub fn selected_crop(&self) -> Crop {
        *self.crop.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Crop used by the next advice request
    pub fn select_crop(&self, crop: Crop) {
        *self.crop.lock().unwrap_or_else(|e| e.into_inner()) = crop;
    }

    pub fn dismiss_error(&self) {
        self.lock_state().error = None;
    }

    pub fn avatar_initial(&self) -> String {
        avatar_initial(self.store.as_ref())
    }

    /// Run one location → advice → forecast sequence.
    ///
    /// The state is updated either way; the result is returned for callers
    /// that want to act on it.
    pub async fn request_advice(&self) -> AppResult<()> {
        let crop = self.selected_crop();
        self.lock_state().begin();
        tracing::info!("Starting advice sequence for {}", crop);

        match self.run_sequence(crop).await {
            Ok((advice, forecast)) => {
                tracing::info!(
                    "Advice ready for {:?}: {} forecast days, {} history entries",
                    advice.county,
                    forecast.len(),
                    advice.history.len()
                );
                self.lock_state().publish(advice, forecast);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Advice sequence failed [{}]: {}", err.code(), err);
                self.lock_state().fail(&err);
                Err(err)
            }
        }
    }

    async fn run_sequence(&self, crop: Crop) -> AppResult<(AdvicePayload, Vec<DailyForecast>)> {
        let coordinate = self.geolocation.request().await?;
        let advice = self
            .advice
            .fetch_advice(coordinate, crop, &self.user_id)
            .await?;
        let forecast = self.weather.fetch_forecast(coordinate).await?;
        Ok((advice, forecast))
    }

    fn lock_state(&self) -> MutexGuard<'_, DashboardViewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
