use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The only boundary to the hosted language model.
///
/// One request per call: no retries, caching or rate limiting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, prompt: &str, max_output_tokens: u32) -> AppResult<String>;
}

/// Anthropic Messages API client.
///
/// Does not derive `Debug` so the API key cannot end up in logs.
pub struct AnthropicGateway {
    http: reqwest::Client,
    api_key: SecretString,
    api_base_url: String,
    model: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct ProviderErrorResponse {
    error: Option<ProviderErrorDetail>,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

impl AnthropicGateway {
    pub fn new(
        api_key: SecretString,
        model: impl Into<String>,
        api_base_url: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.anthropic_api_key.clone(),
            config.anthropic_model.clone(),
            config.anthropic_api_base_url.clone(),
            Duration::from_secs(config.model_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Maps a non-success provider status to an error kind.
///
/// Rate limiting and overload (429, 503, 529) are reported as unavailability.
fn status_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ProviderErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map(|detail| detail.message)
        .unwrap_or_else(|| body.chars().take(200).collect());

    let message = format!("provider returned {}: {}", status, message);

    match status.as_u16() {
        429 | 503 | 529 => AppError::ModelUnavailable(message),
        _ => AppError::ModelError(message),
    }
}

fn collect_text(response: MessagesResponse) -> AppResult<String> {
    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();

    if text.trim().is_empty() {
        return Err(AppError::ModelError(
            "provider response contained no text".to_string(),
        ));
    }

    Ok(text)
}

#[async_trait]
impl ModelGateway for AnthropicGateway {
    async fn complete(&self, prompt: &str, max_output_tokens: u32) -> AppResult<String> {
        let url = format!("{}/v1/messages", self.api_base_url);

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: max_output_tokens,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        };

        log::debug!(
            "Sending {} char prompt to {} (max_tokens={})",
            prompt.len(),
            self.model,
            max_output_tokens
        );

        let response = self
            .http
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Model request to {} failed: {}", url, e);
                AppError::ModelUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = status_error(status, &body);
            log::error!("Model call failed: {}", err);
            return Err(err);
        }

        let envelope: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::ModelError(format!("undecodable provider response: {}", e)))?;

        collect_text(envelope)
    }
}
