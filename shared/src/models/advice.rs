//! Advice request body and normalized advice response

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::history::{normalize_history, HistoryEntry};
use crate::models::recommendation::RecommendationSet;
use crate::models::soil::SoilReading;
use crate::normalize::{coerce_number, text_or_empty};
use crate::types::{Coordinate, Crop};

/// JSON body posted to the advice service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub lat: f64,
    pub lon: f64,
    pub crop: String,
    pub user_id: String,
}

impl AdviceRequest {
    pub fn new(coordinate: Coordinate, crop: Crop, user_id: impl Into<String>) -> Self {
        Self {
            lat: coordinate.latitude,
            lon: coordinate.longitude,
            crop: crop.code().to_string(),
            user_id: user_id.into(),
        }
    }
}

/// Error body sent with non-2xx advice responses
#[derive(Debug, Clone, Deserialize)]
pub struct AdviceErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Advice response with every field present and normalized
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvicePayload {
    pub county: String,
    pub soil_data: SoilReading,
    pub recommendations: RecommendationSet,
    pub total_rain: f64,
    pub history: Vec<HistoryEntry>,
}

impl AdvicePayload {
    /// Normalize a raw advice response; never fails
    pub fn from_value(raw: &Value) -> Self {
        let field = |key: &str| raw.as_object().and_then(|o| o.get(key));

        Self {
            county: text_or_empty(field("county")),
            soil_data: SoilReading::normalize(field("soilData")),
            recommendations: RecommendationSet::from_value(field("recommendations")),
            total_rain: field("totalRain").map(coerce_number).unwrap_or(0.0),
            history: normalize_history(field("history")),
        }
    }
}
