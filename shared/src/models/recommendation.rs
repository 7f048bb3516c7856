//! Crop recommendation model

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::text_or_empty;

/// Advisory text returned by the advice service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSet {
    pub crop: String,
    pub soil: String,
    pub weather: String,
    pub biodiversity: String,
    pub alternative_crops: Vec<String>,
}

impl RecommendationSet {
    /// Read recommendations leniently; missing parts become empty
    pub fn from_value(raw: Option<&Value>) -> Self {
        let Some(object) = raw.and_then(Value::as_object) else {
            return Self::default();
        };

        let alternative_crops = object
            .get("alternativeCrops")
            .and_then(Value::as_array)
            .map(|crops| {
                crops
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            crop: text_or_empty(object.get("crop")),
            soil: text_or_empty(object.get("soil")),
            weather: text_or_empty(object.get("weather")),
            biodiversity: text_or_empty(object.get("biodiversity")),
            alternative_crops,
        }
    }

    pub fn has_alternatives(&self) -> bool {
        !self.alternative_crops.is_empty()
    }
}
