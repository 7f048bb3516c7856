//! Climate-Smart Soil Advisor - dashboard client
//!
//! Requests a location, asks the advice service what to plant, pulls the
//! hourly forecast for the same spot and publishes the normalized result as
//! a single dashboard state.

pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
