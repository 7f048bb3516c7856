//! Account and session models for the sign-in flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Storage key holding the signed-in user's display name
pub const DISPLAY_NAME_KEY: &str = "userName";

/// Fallback when no usable name can be derived
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Email/password sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// New account registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// An authenticated session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub display_name: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Authentication failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Could not save session: {0}")]
    Storage(String),
}

/// Email local part with its first letter upper-cased
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default().trim();
    capitalize(local).unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
}

/// First word of the registered name
pub fn display_name_from_full_name(name: &str) -> String {
    name.split_whitespace()
        .next()
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
}

fn capitalize(s: &str) -> Option<String> {
    let mut chars = s.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
