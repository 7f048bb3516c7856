//! Authentication service for sign-in, registration and verification
//!
//! [`SimulatedAuthService`] stands in for a real identity backend: it waits a
//! fixed delay, checks the form input and records the display name locally.

use std::future::Future;
use std::time::Duration;

use shared::{
    display_name, display_name_from_email, display_name_from_full_name, validate_credentials,
    validate_otp, validate_reset_email, validate_sign_up, AuthError, Credentials, KeyValueStore,
    Session, SignUpRequest, DEFAULT_DISPLAY_NAME, DISPLAY_NAME_KEY,
};

use crate::config::AuthConfig;

/// Account operations the sign-in dialog depends on
pub trait AuthService {
    fn sign_in(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    /// Register an account; the user signs in afterwards
    fn sign_up(&self, request: SignUpRequest) -> impl Future<Output = Result<(), AuthError>> + Send;

    fn verify_otp(&self, code: &str) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn request_password_reset(&self, email: &str)
        -> impl Future<Output = Result<(), AuthError>> + Send;

    fn sign_out(&self) -> Result<(), AuthError>;
}

/// Timer-backed stand-in for the identity backend
#[derive(Debug, Clone)]
pub struct SimulatedAuthService<S> {
    store: S,
    delay: Duration,
}

impl<S> SimulatedAuthService<S>
where
    S: KeyValueStore + Send + Sync,
{
    pub fn new(store: S, delay: Duration) -> Self {
        Self { store, delay }
    }

    pub fn from_config(store: S, config: &AuthConfig) -> Self {
        Self::new(store, config.simulated_delay())
    }

    fn remember(&self, name: &str) -> Result<(), AuthError> {
        self.store
            .set(DISPLAY_NAME_KEY, name)
            .map_err(AuthError::Storage)
    }

    async fn round_trip(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl<S> AuthService for SimulatedAuthService<S>
where
    S: KeyValueStore + Send + Sync,
{
    async fn sign_in(&self, credentials: Credentials) -> Result<Session, AuthError> {
        self.round_trip().await;
        validate_credentials(&credentials).map_err(AuthError::Validation)?;

        let name = display_name_from_email(&credentials.email);
        self.remember(&name)?;
        tracing::info!("Signed in as {}", name);
        Ok(Session::new(name))
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<(), AuthError> {
        validate_sign_up(&request).map_err(AuthError::Validation)?;
        self.round_trip().await;

        let name = display_name_from_full_name(&request.name);
        self.remember(&name)?;
        tracing::info!("Registered account for {}", name);
        Ok(())
    }

    async fn verify_otp(&self, code: &str) -> Result<Session, AuthError> {
        self.round_trip().await;
        validate_otp(code).map_err(AuthError::Validation)?;

        let name = display_name(&self.store).unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
        Ok(Session::new(name))
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.round_trip().await;
        validate_reset_email(email).map_err(AuthError::Validation)?;
        tracing::info!("Password reset link requested for {}", email.trim());
        Ok(())
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        self.store
            .remove(DISPLAY_NAME_KEY)
            .map_err(AuthError::Storage)
    }
}
