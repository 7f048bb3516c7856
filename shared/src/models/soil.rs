//! Soil reading model and key-casing reconciliation

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{resolve_number, FieldAlias};

/// Canonical soil keys and the legacy spellings older backends still send
pub const SOIL_FIELD_ALIASES: [FieldAlias; 4] = [
    ("ph", &["pH", "PH"]),
    ("nitrogen", &["N", "n"]),
    ("phosphorus", &["P", "p"]),
    ("potassium", &["K", "k"]),
];

/// Soil nutrient reading for a location
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SoilReading {
    pub ph: f64,
    /// mg/kg
    pub nitrogen: f64,
    /// mg/kg
    pub phosphorus: f64,
    /// mg/kg
    pub potassium: f64,
}

impl SoilReading {
    /// Build a reading from a raw soil object in canonical or legacy form.
    ///
    /// Never fails. Anything that is not an object yields an all-zero reading.
    pub fn normalize(raw: Option<&Value>) -> Self {
        let Some(object) = raw.and_then(Value::as_object) else {
            return Self::default();
        };

        let [ph, nitrogen, phosphorus, potassium] =
            SOIL_FIELD_ALIASES.map(|alias| resolve_number(object, &alias));

        Self {
            ph,
            nitrogen,
            phosphorus,
            potassium,
        }
    }

    /// A reading with no pH is treated as "no data yet"
    pub fn is_measured(&self) -> bool {
        self.ph > 0.0
    }

    pub fn ph_category(&self) -> PhCategory {
        PhCategory::classify(self.ph)
    }
}

/// Acidity bands shown next to the pH value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhCategory {
    VeryAcidic,
    Acidic,
    Neutral,
    Alkaline,
}

impl PhCategory {
    pub fn classify(ph: f64) -> Self {
        if ph < 5.5 {
            PhCategory::VeryAcidic
        } else if ph < 6.5 {
            PhCategory::Acidic
        } else if ph < 7.5 {
            PhCategory::Neutral
        } else {
            PhCategory::Alkaline
        }
    }
}

impl fmt::Display for PhCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhCategory::VeryAcidic => "Very acidic",
            PhCategory::Acidic => "Acidic",
            PhCategory::Neutral => "Neutral",
            PhCategory::Alkaline => "Alkaline",
        };
        f.write_str(label)
    }
}
