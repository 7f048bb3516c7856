//! WebAssembly module for the Climate-Smart Soil Advisor
//!
//! Provides client-side shaping for:
//! - Soil reading normalization and pH bands
//! - Hourly-to-daily forecast aggregation
//! - Search history labels
//! - The signed-in user's avatar initial

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::storage::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("soil advisor bindings loaded"));
}

fn parse(json: &str) -> Result<Value, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid JSON: {}", e)))
}

fn render<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Normalize a raw `soilData` object into canonical field names
#[wasm_bindgen]
pub fn normalize_soil_json(soil_json: &str) -> Result<String, JsValue> {
    let raw = parse(soil_json)?;
    render(&SoilReading::normalize(Some(&raw)))
}

/// Acidity band label for a pH value
#[wasm_bindgen]
pub fn classify_ph(ph: f64) -> String {
    PhCategory::classify(ph).to_string()
}

/// Collapse an hourly forecast into at most seven daily summaries.
///
/// Accepts either the full forecast response or its `hourly` block.
#[wasm_bindgen]
pub fn aggregate_hourly_json(forecast_json: &str) -> Result<String, JsValue> {
    let mut raw = parse(forecast_json)?;
    if let Some(hourly) = raw.get_mut("hourly") {
        raw = hourly.take();
    }
    let hourly: HourlySeries = serde_json::from_value(raw)
        .map_err(|e| JsValue::from_str(&format!("Invalid hourly data: {}", e)))?;
    render(&aggregate_daily(&hourly))
}

/// Normalize a raw history array
#[wasm_bindgen]
pub fn normalize_history_json(history_json: &str) -> Result<String, JsValue> {
    let raw = parse(history_json)?;
    render(&normalize_history(Some(&raw)))
}

/// Time label for one history entry, in the browser's locale
#[wasm_bindgen]
pub fn history_time_label(entry_json: &str, index: usize) -> Result<String, JsValue> {
    let entry = HistoryEntry::from_value(&parse(entry_json)?);
    let label = match entry.display_time(index) {
        HistoryTime::At(timestamp) => {
            let date = js_sys::Date::new(&JsValue::from_f64(timestamp.timestamp_millis() as f64));
            date.to_locale_string("default", &JsValue::UNDEFINED).into()
        }
        other => other.to_string(),
    };
    Ok(label)
}

/// Avatar letter for the name saved at sign-in
#[wasm_bindgen]
pub fn avatar_initial() -> String {
    shared::avatar_initial(&LocalStorageStore)
}

/// [`KeyValueStore`] over the browser's `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .ok_or("No window available")?
            .local_storage()
            .map_err(|e| format!("localStorage is not accessible: {:?}", e))?
            .ok_or_else(|| "localStorage is disabled".to_string())
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| format!("Failed to save {}: {:?}", key, e))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| format!("Failed to remove {}: {:?}", key, e))
    }
}
