//! Error handling for the soil advisor client
//!
//! Every variant's message is the exact text shown in the dashboard's
//! error banner.

use shared::AuthError;
use thiserror::Error;

/// Generic message used when the advice service gives no usable reason
pub const ADVICE_FALLBACK_MESSAGE: &str = "Failed to fetch advice from server";

/// Application error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    // Location errors
    #[error("Geolocation is not supported by your browser.")]
    CapabilityUnavailable,

    #[error("Error getting location: {0}. Please try again or enter a county manually.")]
    PermissionOrPosition(String),

    // External service errors
    #[error("{message}")]
    AdviceRequestFailed { message: String },

    #[error("Error fetching weather forecast: {0}")]
    WeatherRequestFailed(String),

    // Account errors
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn advice(message: impl Into<String>) -> Self {
        AppError::AdviceRequestFailed {
            message: message.into(),
        }
    }

    /// Short code for structured logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::CapabilityUnavailable => "CAPABILITY_UNAVAILABLE",
            AppError::PermissionOrPosition(_) => "PERMISSION_OR_POSITION",
            AppError::AdviceRequestFailed { .. } => "ADVICE_REQUEST_FAILED",
            AppError::WeatherRequestFailed(_) => "WEATHER_REQUEST_FAILED",
            AppError::Auth(_) => "AUTH_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias for the advice pipeline
pub type AppResult<T> = Result<T, AppError>;
