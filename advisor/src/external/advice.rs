//! Advice API client
//!
//! Posts the location and crop to the advice service and normalizes whatever
//! comes back into an [`AdvicePayload`].

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use shared::{AdviceErrorBody, AdvicePayload, AdviceRequest, Coordinate, Crop};

use crate::config::AdviceConfig;
use crate::error::{AppError, AppResult, ADVICE_FALLBACK_MESSAGE};
use crate::external::AdviceSource;

/// Advice API client
#[derive(Clone)]
pub struct AdviceClient {
    client: Client,
    endpoint: String,
}

impl AdviceClient {
    /// Create a new AdviceClient without a request timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a client that gives up after `timeout`
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build advice client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &AdviceConfig) -> AppResult<Self> {
        Self::with_timeout(config.endpoint.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request advice for a location and crop
    pub async fn fetch_advice(
        &self,
        coordinate: Coordinate,
        crop: Crop,
        user_id: &str,
    ) -> AppResult<AdvicePayload> {
        let body = AdviceRequest::new(coordinate, crop, user_id);
        tracing::debug!("POST {} crop={} user={}", self.endpoint, body.crop, body.user_id);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::advice(format!("Advice API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Advice API error: {} - {}", status, body);
            return Err(AppError::advice(error_message(&body)));
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| AppError::advice(format!("Failed to parse advice response: {}", e)))?;

        Ok(AdvicePayload::from_value(&raw))
    }
}

impl AdviceSource for AdviceClient {
    async fn fetch_advice(
        &self,
        coordinate: Coordinate,
        crop: Crop,
        user_id: &str,
    ) -> AppResult<AdvicePayload> {
        AdviceClient::fetch_advice(self, coordinate, crop, user_id).await
    }
}

/// Human-readable reason from an error body, or the generic fallback
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<AdviceErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| ADVICE_FALLBACK_MESSAGE.to_string())
}
