//! Configuration management for the soil advisor client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with SOIL_ADVISOR_ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{Coordinate, Crop};

pub const DEFAULT_ADVICE_ENDPOINT: &str = "http://localhost:3000/api/advice";
pub const DEFAULT_FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Advice service configuration
    pub advice: AdviceConfig,

    /// Forecast service configuration
    pub weather: WeatherConfig,

    /// Dashboard defaults
    pub dashboard: DashboardConfig,

    /// Fixed location used in place of a device location service
    #[serde(default)]
    pub location: LocationConfig,

    /// Local key-value storage
    pub storage: StorageConfig,

    /// Simulated sign-in flow
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdviceConfig {
    /// Advice endpoint URL (POST)
    pub endpoint: String,

    /// Request timeout in seconds; unset means wait indefinitely
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Hourly forecast endpoint URL (GET)
    pub endpoint: String,

    /// Request timeout in seconds; unset means wait indefinitely
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// User id sent with every advice request
    pub user_id: String,

    /// Crop selected when the dashboard opens
    pub crop: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file backing the key-value store
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Delay standing in for the sign-in round trip
    pub simulated_delay_ms: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SOIL_ADVISOR_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("advice.endpoint", DEFAULT_ADVICE_ENDPOINT)?
            .set_default("weather.endpoint", DEFAULT_FORECAST_ENDPOINT)?
            .set_default("dashboard.user_id", "default_user")?
            .set_default("dashboard.crop", Crop::default().code())?
            .set_default("storage.path", ".soil-advisor/storage.json")?
            .set_default("auth.simulated_delay_ms", 1000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SOIL_ADVISOR_ prefix)
            .add_source(
                Environment::with_prefix("SOIL_ADVISOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Configured crop, falling back to the default for unknown names
    pub fn crop(&self) -> Crop {
        self.dashboard.crop.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown crop {:?} in configuration, using default", self.dashboard.crop);
            Crop::default()
        })
    }
}

impl LocationConfig {
    /// Both axes must be set for a fix to exist
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }
}

impl AdviceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl AuthConfig {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}
