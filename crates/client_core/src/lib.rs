use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use thiserror::Error;
use tracing::{debug, warn};

pub mod config;
pub mod controller;
pub mod validation;

pub use config::{load_settings, Settings, SettingsError};
pub use controller::{
    ConversionController, ConversionTicket, SessionState, Settlement, SubmitOutcome,
};
pub use validation::{validate, ValidationWarning};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Failure of the remote generation call. The `Display` text is what the
/// controller classifies, so it keeps the status code and server message.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("API key is not configured")]
    MissingApiKey,
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("model returned no text (finish reason: {0})")]
    EmptyResponse(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// The remote model: `content` is the user's text, `system_instruction` the
/// mode-specific prompt.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        content: &str,
        system_instruction: &str,
    ) -> std::result::Result<String, GenerateError>;
}

pub struct GeminiGenerator {
    http: Client,
    api_base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiGenerator {
    pub fn new(
        api_base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_base_url: api_base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self {
            http,
            api_base_url: settings.api_base_url.clone(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(
        &self,
        content: &str,
        system_instruction: &str,
    ) -> std::result::Result<String, GenerateError> {
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Err(GenerateError::MissingApiKey);
        };

        debug!(model = %self.model, chars = content.chars().count(), "sending generate request");
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::new(content, system_instruction))
            .send()
            .await
            .map_err(|err| GenerateError::Network(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .ok()
                .map(|envelope| envelope.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            warn!(status = status.as_u16(), "generate request rejected: {message}");
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerateError::Decode(err.without_url().to_string()))?;

        body.first_text().ok_or_else(|| {
            let reason = body
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "none".to_string());
            GenerateError::EmptyResponse(reason)
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
