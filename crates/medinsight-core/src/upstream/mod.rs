//! Gemini REST client.
//!
//! Implements [`ModelProvider`] against `models/{model}:generateContent`.
//! Model construction is local (API key present, model name well-formed);
//! every generate call is a single POST with no retry of its own, leaving
//! retry policy to the invoker.

mod request_executor;

#[cfg(test)]
mod tests;

pub use request_executor::{
    build_request_body, build_url, normalize_model_id, parse_error_response,
};

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use medinsight_types::protocol::GenerateContentResponse;
use medinsight_types::{ConfigError, GeminiConfig, Request, UpstreamError};

use crate::error::AppResult;
use crate::invoker::{GenerativeModel, ModelProvider};

/// Header carrying the API key; keeps it out of URLs and access logs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(config: &GeminiConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("medinsight/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http_client(http_client, config)
    }

    /// Build a client around a pre-built `reqwest::Client`.
    pub fn with_http_client(http_client: Client, config: &GeminiConfig) -> AppResult<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if url::Url::parse(&base_url).is_err() {
            return Err(ConfigError::invalid("gemini.base_url", "must be a valid URL").into());
        }

        let api_key = Some(config.api_key.trim().to_string()).filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!("Gemini API key is not configured; every generation will fail");
        }

        Ok(Self { http_client, base_url, api_key })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl ModelProvider for GeminiClient {
    fn model(&self, model_id: &str) -> Result<Box<dyn GenerativeModel>, UpstreamError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| UpstreamError::new(ConfigError::MissingApiKey.to_string()))?;
        let model_id = normalize_model_id(model_id)?;

        Ok(Box::new(GeminiModel {
            url: build_url(&self.base_url, &model_id),
            model_id,
            api_key,
            http_client: self.http_client.clone(),
        }))
    }
}

/// One Gemini model bound to its endpoint URL.
pub struct GeminiModel {
    model_id: String,
    url: String,
    api_key: String,
    http_client: Client,
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, request: &Request) -> Result<String, UpstreamError> {
        let body = build_request_body(request);

        let response = self
            .http_client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            // The URL stays out of the message so host names never reach the classifier.
            .map_err(|e| UpstreamError::new(format!("transport error: {}", e.without_url())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| {
                UpstreamError::new(format!("failed to read response body: {}", e.without_url()))
            })?;

        if !status.is_success() {
            let err = parse_error_response(status, &text);
            tracing::debug!("Gemini {} returned {}: {}", self.model_id, status, err);
            return Err(err);
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| UpstreamError::new(format!("invalid response body: {}", e)))?;
        Ok(parsed.text())
    }
}
