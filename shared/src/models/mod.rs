//! Domain models for the soil advisor

mod advice;
mod history;
mod recommendation;
mod soil;
mod user;
mod weather;

pub use advice::*;
pub use history::*;
pub use recommendation::*;
pub use soil::*;
pub use user::*;
pub use weather::*;
