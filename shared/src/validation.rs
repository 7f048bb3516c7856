//! Validation utilities for the sign-in and registration forms

use crate::models::{Credentials, SignUpRequest};

/// Minimum number of characters accepted as a phone number
pub const MIN_PHONE_LENGTH: usize = 10;

/// Length of the verification code sent by SMS
pub const OTP_LENGTH: usize = 6;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Both fields must be filled in
pub fn validate_credentials(credentials: &Credentials) -> Result<(), &'static str> {
    if is_blank(&credentials.email) || credentials.password.is_empty() {
        return Err("Please enter your email and password!");
    }
    Ok(())
}

/// Validate phone number length
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.trim().chars().count() < MIN_PHONE_LENGTH {
        return Err("Please enter a valid phone number!");
    }
    Ok(())
}

/// Validate a registration form
pub fn validate_sign_up(request: &SignUpRequest) -> Result<(), &'static str> {
    if request.password != request.confirm_password {
        return Err("Passwords do not match!");
    }
    validate_phone(&request.phone)?;
    if is_blank(&request.name) || is_blank(&request.email) || request.password.is_empty() {
        return Err("Please fill in all fields!");
    }
    Ok(())
}

/// Validate a 6-digit verification code
pub fn validate_otp(code: &str) -> Result<(), &'static str> {
    if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("Please enter a valid 6-digit OTP!");
    }
    Ok(())
}

/// A reset link needs somewhere to go
pub fn validate_reset_email(email: &str) -> Result<(), &'static str> {
    if is_blank(email) {
        return Err("Please enter your email address!");
    }
    Ok(())
}
