//! Shared types and models for the Climate-Smart Soil Advisor
//!
//! Pure data shaping used by the native advisor client and the browser
//! bindings: soil and history normalization, recommendation parsing,
//! hourly-to-daily forecast aggregation, form validation and the
//! key-value store capability.

pub mod models;
pub mod normalize;
pub mod storage;
pub mod types;
pub mod validation;

pub use models::*;
pub use storage::*;
pub use types::*;
pub use validation::*;
