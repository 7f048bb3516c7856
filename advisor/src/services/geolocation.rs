//! Location sources for the advice sequence

use std::future::Future;

use shared::Coordinate;

use crate::config::LocationConfig;
use crate::error::{AppError, AppResult};

/// Single-shot location lookup. Every call asks the platform again.
pub trait GeolocationSource {
    fn request(&self) -> impl Future<Output = AppResult<Coordinate>> + Send;
}

/// Location taken from configuration instead of a device sensor.
///
/// With nothing configured the capability is reported as unavailable.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    coordinate: Option<Coordinate>,
}

impl ConfiguredLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
        }
    }

    pub fn unsupported() -> Self {
        Self { coordinate: None }
    }

    pub fn from_config(config: &LocationConfig) -> Self {
        Self {
            coordinate: config.coordinate(),
        }
    }
}

impl GeolocationSource for ConfiguredLocation {
    async fn request(&self) -> AppResult<Coordinate> {
        let coordinate = self.coordinate.ok_or(AppError::CapabilityUnavailable)?;
        if !coordinate.is_valid() {
            return Err(AppError::PermissionOrPosition(format!(
                "Position unavailable ({}, {})",
                coordinate.latitude, coordinate.longitude
            )));
        }
        Ok(coordinate)
    }
}
