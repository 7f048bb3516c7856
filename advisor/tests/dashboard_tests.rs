//! Dashboard sequence tests
//!
//! Drives the controller with in-memory collaborators:
//! - Idle → Loading → Ready / Failed transitions
//! - all-or-nothing publication when the forecast fails
//! - overlapping requests
//! - end-to-end against in-process HTTP services

mod common;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use shared::{
    AdvicePayload, Coordinate, Crop, DailyForecast, KeyValueStore, MemoryStore, SoilReading,
    DISPLAY_NAME_KEY,
};
use soil_advisor::external::{AdviceClient, AdviceSource, ForecastSource, WeatherClient};
use soil_advisor::services::{
    ConfiguredLocation, DashboardController, DashboardPhase, GeolocationSource,
};
use soil_advisor::{AppError, AppResult};
use tokio::sync::oneshot;

// ============================================================================
// Test doubles
// ============================================================================

struct FakeLocation {
    result: AppResult<Coordinate>,
    calls: AtomicUsize,
}

impl FakeLocation {
    fn at(coordinate: Coordinate) -> Self {
        Self {
            result: Ok(coordinate),
            calls: AtomicUsize::new(0),
        }
    }

    fn denied(message: &str) -> Self {
        Self {
            result: Err(AppError::PermissionOrPosition(message.to_string())),
            calls: AtomicUsize::new(0),
        }
    }
}

impl GeolocationSource for FakeLocation {
    async fn request(&self) -> AppResult<Coordinate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Answers advice requests from a script, one entry per call
#[derive(Default)]
struct ScriptedAdvice {
    script: Mutex<VecDeque<AppResult<AdvicePayload>>>,
    gated: Mutex<VecDeque<oneshot::Receiver<AppResult<AdvicePayload>>>>,
    crops: Arc<Mutex<Vec<Crop>>>,
}

impl ScriptedAdvice {
    fn replying(results: Vec<AppResult<AdvicePayload>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            ..Default::default()
        }
    }

    fn gated(receivers: Vec<oneshot::Receiver<AppResult<AdvicePayload>>>) -> Self {
        Self {
            gated: Mutex::new(receivers.into()),
            ..Default::default()
        }
    }
}

impl AdviceSource for ScriptedAdvice {
    async fn fetch_advice(
        &self,
        _coordinate: Coordinate,
        crop: Crop,
        user_id: &str,
    ) -> AppResult<AdvicePayload> {
        assert_eq!(user_id, "farmer-1");
        self.crops.lock().unwrap().push(crop);

        let scripted = self.script.lock().unwrap().pop_front();
        if let Some(result) = scripted {
            return result;
        }
        let receiver = self.gated.lock().unwrap().pop_front().expect("no scripted reply");
        receiver.await.expect("reply sender dropped")
    }
}

struct ScriptedForecast {
    script: Mutex<VecDeque<AppResult<Vec<DailyForecast>>>>,
}

impl ScriptedForecast {
    fn replying(results: Vec<AppResult<Vec<DailyForecast>>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
        }
    }

    fn always_ok(times: usize) -> Self {
        Self::replying((0..times).map(|_| Ok(two_days())).collect())
    }
}

impl ForecastSource for ScriptedForecast {
    async fn fetch_forecast(&self, _coordinate: Coordinate) -> AppResult<Vec<DailyForecast>> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted forecast")
    }
}

fn payload(county: &str, ph: f64) -> AdvicePayload {
    AdvicePayload {
        county: county.to_string(),
        soil_data: SoilReading {
            ph,
            nitrogen: 30.0,
            phosphorus: 10.0,
            potassium: 100.0,
        },
        total_rain: 4.2,
        ..Default::default()
    }
}

fn two_days() -> Vec<DailyForecast> {
    vec![
        DailyForecast {
            date: "2024-06-01".into(),
            temperature: 19.0,
            ..Default::default()
        },
        DailyForecast {
            date: "2024-06-02".into(),
            temperature: 21.0,
            ..Default::default()
        },
    ]
}

fn kisumu() -> Coordinate {
    Coordinate::new(-0.0917, 34.768)
}

// ============================================================================
// State machine
// ============================================================================

#[tokio::test]
async fn test_initial_state_is_idle_and_empty() {
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::default(),
        ScriptedForecast::replying(vec![]),
        "farmer-1",
        Crop::Maize,
    );

    let state = controller.state();
    assert_eq!(state.phase, DashboardPhase::Idle);
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(!state.has_results());
}

#[tokio::test]
async fn test_successful_sequence_publishes_everything() {
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::replying(vec![Ok(payload("Kisumu", 6.4))]),
        ScriptedForecast::always_ok(1),
        "farmer-1",
        Crop::Beans,
    );

    controller.request_advice().await.unwrap();

    let state = controller.state();
    assert_eq!(state.phase, DashboardPhase::Ready);
    assert!(!state.loading);
    assert_eq!(state.county, "Kisumu");
    assert_eq!(state.soil_data.ph, 6.4);
    assert_eq!(state.total_rain, 4.2);
    assert_eq!(state.weather_forecast.len(), 2);
    assert!(state.has_results());
}

#[tokio::test]
async fn test_selected_crop_is_sent() {
    let advice = ScriptedAdvice::replying(vec![Ok(payload("A", 6.0)), Ok(payload("B", 6.0))]);
    let crops = advice.crops.clone();
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        advice,
        ScriptedForecast::always_ok(2),
        "farmer-1",
        Crop::Maize,
    );

    controller.request_advice().await.unwrap();
    controller.select_crop(Crop::Peas);
    assert_eq!(controller.selected_crop(), Crop::Peas);
    controller.request_advice().await.unwrap();

    assert_eq!(controller.state().county, "B");
    assert_eq!(*crops.lock().unwrap(), vec![Crop::Maize, Crop::Peas]);
}

#[tokio::test]
async fn test_unsupported_location_fails() {
    let controller = DashboardController::new(
        ConfiguredLocation::unsupported(),
        ScriptedAdvice::default(),
        ScriptedForecast::replying(vec![]),
        "farmer-1",
        Crop::Maize,
    );

    let err = controller.request_advice().await.unwrap_err();
    assert_eq!(err, AppError::CapabilityUnavailable);

    let state = controller.state();
    assert_eq!(state.phase, DashboardPhase::Failed);
    assert!(!state.loading);
    assert_eq!(
        state.error.as_deref(),
        Some("Geolocation is not supported by your browser.")
    );
}

#[tokio::test]
async fn test_denied_location_fails_without_calling_advice() {
    let advice = ScriptedAdvice::default();
    let controller = DashboardController::new(
        FakeLocation::denied("User denied Geolocation"),
        advice,
        ScriptedForecast::replying(vec![]),
        "farmer-1",
        Crop::Maize,
    );

    controller.request_advice().await.unwrap_err();

    let state = controller.state();
    assert_eq!(state.phase, DashboardPhase::Failed);
    assert!(state.error.unwrap().contains("User denied Geolocation"));
}

#[tokio::test]
async fn test_advice_failure_keeps_previous_data() {
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::replying(vec![
            Ok(payload("Kisumu", 6.4)),
            Err(AppError::advice("bad input")),
        ]),
        ScriptedForecast::always_ok(1),
        "farmer-1",
        Crop::Maize,
    );

    controller.request_advice().await.unwrap();
    controller.request_advice().await.unwrap_err();

    let state = controller.state();
    assert_eq!(state.phase, DashboardPhase::Failed);
    assert_eq!(state.error.as_deref(), Some("bad input"));
    assert_eq!(state.county, "Kisumu");
    assert_eq!(state.soil_data.ph, 6.4);
    assert_eq!(state.weather_forecast.len(), 2);
}

#[tokio::test]
async fn test_weather_failure_discards_fetched_advice() {
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::replying(vec![Ok(payload("Kisumu", 6.4)), Ok(payload("Siaya", 5.2))]),
        ScriptedForecast::replying(vec![
            Ok(two_days()),
            Err(AppError::WeatherRequestFailed("timeout".into())),
        ]),
        "farmer-1",
        Crop::Maize,
    );

    controller.request_advice().await.unwrap();
    let err = controller.request_advice().await.unwrap_err();
    assert!(matches!(err, AppError::WeatherRequestFailed(_)));

    let state = controller.state();
    assert_eq!(state.phase, DashboardPhase::Failed);
    assert_eq!(state.county, "Kisumu");
    assert_eq!(state.soil_data.ph, 6.4);
    assert_eq!(
        state.error.as_deref(),
        Some("Error fetching weather forecast: timeout")
    );
}

#[tokio::test]
async fn test_new_request_clears_error_and_dismiss_works() {
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::replying(vec![
            Err(AppError::advice("bad input")),
            Err(AppError::advice("still bad")),
            Ok(payload("Kisumu", 6.4)),
        ]),
        ScriptedForecast::always_ok(1),
        "farmer-1",
        Crop::Maize,
    );

    controller.request_advice().await.unwrap_err();
    controller.dismiss_error();
    let state = controller.state();
    assert!(state.error.is_none());
    assert_eq!(state.phase, DashboardPhase::Failed);

    controller.request_advice().await.unwrap_err();
    assert_eq!(controller.state().error.as_deref(), Some("still bad"));

    controller.request_advice().await.unwrap();
    let state = controller.state();
    assert!(state.error.is_none());
    assert_eq!(state.phase, DashboardPhase::Ready);
}

#[tokio::test]
async fn test_success_replaces_rather_than_merges() {
    let mut first = payload("Kisumu", 6.4);
    first.recommendations.alternative_crops = vec!["Sorghum".into()];
    let second = payload("Siaya", 5.9);

    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::replying(vec![Ok(first), Ok(second)]),
        ScriptedForecast::replying(vec![Ok(two_days()), Ok(vec![])]),
        "farmer-1",
        Crop::Maize,
    );

    controller.request_advice().await.unwrap();
    controller.request_advice().await.unwrap();

    let state = controller.state();
    assert_eq!(state.county, "Siaya");
    assert!(state.recommendations.alternative_crops.is_empty());
    assert!(state.weather_forecast.is_empty());
}

#[tokio::test]
async fn test_loading_visible_while_in_flight() {
    let (tx, rx) = oneshot::channel();
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::gated(vec![rx]),
        ScriptedForecast::always_ok(1),
        "farmer-1",
        Crop::Maize,
    );

    let request = controller.request_advice();
    let observe = async {
        tokio::task::yield_now().await;
        let during = controller.state();
        tx.send(Ok(payload("Kisumu", 6.4))).unwrap();
        during
    };
    let (outcome, during) = tokio::join!(request, observe);

    outcome.unwrap();
    assert!(during.loading);
    assert_eq!(during.phase, DashboardPhase::Loading);
    assert!(!controller.state().loading);
}

#[tokio::test]
async fn test_overlapping_requests_last_completion_wins() {
    let (tx_a, rx_a) = oneshot::channel();
    let (tx_b, rx_b) = oneshot::channel();
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::gated(vec![rx_a, rx_b]),
        ScriptedForecast::always_ok(2),
        "farmer-1",
        Crop::Maize,
    );

    let first = controller.request_advice();
    let second = controller.request_advice();
    let resolve = async {
        tokio::task::yield_now().await;
        tx_b.send(Ok(payload("Second", 5.0))).unwrap();
        tokio::task::yield_now().await;
        tx_a.send(Ok(payload("First", 6.0))).unwrap();
    };
    let (a, b, ()) = tokio::join!(first, second, resolve);

    assert!(a.is_ok());
    assert!(b.is_ok());
    let state = controller.state();
    assert_eq!(state.phase, DashboardPhase::Ready);
    assert!(!state.loading);
    assert!(state.county == "First" || state.county == "Second");
}

#[tokio::test]
async fn test_avatar_initial_reads_store() {
    let store = MemoryStore::new();
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::default(),
        ScriptedForecast::replying(vec![]),
        "farmer-1",
        Crop::Maize,
    )
    .with_store(Arc::new(store.clone()));

    assert_eq!(controller.avatar_initial(), "U");
    store.set(DISPLAY_NAME_KEY, "otieno").unwrap();
    assert_eq!(controller.avatar_initial(), "O");
}

// ============================================================================
// End to end over HTTP
// ============================================================================

async fn http_controller(
    advice: Router,
) -> DashboardController<ConfiguredLocation, AdviceClient, WeatherClient> {
    let forecast = Router::new().route(
        "/v1/forecast",
        get(|| async { Json(common::hourly_body(3)) }),
    );
    let advice_base = common::serve(advice).await;
    let forecast_base = common::serve(forecast).await;

    DashboardController::new(
        ConfiguredLocation::new(kisumu()),
        AdviceClient::new(format!("{}/api/advice", advice_base)),
        WeatherClient::new(format!("{}/v1/forecast", forecast_base)),
        "farmer-1",
        Crop::Maize,
    )
}

#[tokio::test]
async fn test_end_to_end_success() {
    let advice = Router::new().route(
        "/api/advice",
        post(|Json(_body): Json<Value>| async { Json(common::legacy_advice_body()) }),
    );
    let controller = http_controller(advice).await;

    controller.request_advice().await.unwrap();

    let state = controller.state();
    assert_eq!(state.phase, DashboardPhase::Ready);
    assert_eq!(state.county, "Nakuru");
    assert_eq!(state.soil_data.ph, 6.3);
    assert_eq!(state.weather_forecast.len(), 3);
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.history[0].display_time(0).to_string(), "accessed now");
    assert_eq!(state.history[1].display_time(1).to_string(), "unknown time");
}

#[tokio::test]
async fn test_end_to_end_error_message() {
    let advice = Router::new().route(
        "/api/advice",
        post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"message": "bad input"}))) }),
    );
    let controller = http_controller(advice).await;

    controller.request_advice().await.unwrap_err();

    let state = controller.state();
    assert_eq!(state.phase, DashboardPhase::Failed);
    assert_eq!(state.error.as_deref(), Some("bad input"));
}

#[tokio::test]
async fn test_state_serializes_for_rendering() {
    let controller = DashboardController::new(
        FakeLocation::at(kisumu()),
        ScriptedAdvice::replying(vec![Ok(payload("Kisumu", 6.4))]),
        ScriptedForecast::always_ok(1),
        "farmer-1",
        Crop::Maize,
    );
    controller.request_advice().await.unwrap();

    let value = serde_json::to_value(controller.state()).unwrap();
    assert_eq!(value["phase"], "ready");
    assert_eq!(value["soilData"]["ph"], 6.4);
    assert_eq!(value["weatherForecast"].as_array().unwrap().len(), 2);
    assert_eq!(value["error"], Value::Null);
}
