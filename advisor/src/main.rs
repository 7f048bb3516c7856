//! Climate-Smart Soil Advisor - command line dashboard
//!
//! Runs one advice sequence for the configured location and crop and prints
//! the resulting dashboard state as JSON.

use std::sync::Arc;

use soil_advisor::external::{AdviceClient, WeatherClient};
use soil_advisor::services::{ConfiguredLocation, DashboardController, FileStore};
use soil_advisor::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soil_advisor=debug,reqwest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Climate-Smart Soil Advisor");
    tracing::info!("Environment: {}", config.environment);

    let store = FileStore::new(&config.storage.path);
    let controller = DashboardController::new(
        ConfiguredLocation::from_config(&config.location),
        AdviceClient::from_config(&config.advice)?,
        WeatherClient::from_config(&config.weather)?,
        config.dashboard.user_id.clone(),
        config.crop(),
    )
    .with_store(Arc::new(store));

    tracing::info!(
        "Signed in as {} with crop {}",
        controller.avatar_initial(),
        controller.selected_crop()
    );

    let outcome = controller.request_advice().await;
    println!("{}", serde_json::to_string_pretty(&controller.state())?);

    outcome.map_err(|err| anyhow::anyhow!("advice sequence failed: {}", err))
}
