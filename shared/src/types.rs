//! Common types used across the advisor

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// GPS coordinates of a single location fix
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both axes are finite and inside the WGS84 range
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Crops the advice service knows about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    #[default]
    Maize,
    Beans,
    Peas,
    Potatoes,
}

impl Crop {
    pub const ALL: [Crop; 4] = [Crop::Maize, Crop::Beans, Crop::Peas, Crop::Potatoes];

    /// Value sent to the advice service
    pub fn code(&self) -> &'static str {
        match self {
            Crop::Maize => "maize",
            Crop::Beans => "beans",
            Crop::Peas => "peas",
            Crop::Potatoes => "potatoes",
        }
    }

    /// Label shown in the crop selector
    pub fn label(&self) -> &'static str {
        match self {
            Crop::Maize => "Maize",
            Crop::Beans => "Beans",
            Crop::Peas => "Peas",
            Crop::Potatoes => "Potatoes",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Crop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Crop::ALL
            .into_iter()
            .find(|crop| crop.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown crop: {}", s))
    }
}
