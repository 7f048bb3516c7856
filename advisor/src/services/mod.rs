//! Services driving the dashboard

pub mod auth;
pub mod dashboard;
pub mod geolocation;
pub mod storage;

pub use auth::{AuthService, SimulatedAuthService};
pub use dashboard::{DashboardController, DashboardPhase, DashboardViewState};
pub use geolocation::{ConfiguredLocation, GeolocationSource};
pub use storage::FileStore;
