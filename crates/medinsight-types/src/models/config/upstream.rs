//! Gemini endpoint settings and default model fallback lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini REST API.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct GeminiConfig {
    /// API key; empty means "not configured"
    #[serde(default)]
    pub api_key: String,
    /// Base URL up to and including the API version segment
    #[validate(url(message = "must be a valid URL"))]
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[validate(range(min = 5_u64, max = 600_u64, message = "must be between 5 and 600"))]
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl GeminiConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// Keeps the key out of logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<unset>" })
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Fallback models appended after a report's preferred model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ModelDefaults {
    /// Fallbacks for requests carrying an image
    #[validate(length(min = 1_u64, message = "must list at least one model"))]
    #[serde(default = "default_vision_fallbacks")]
    pub vision_fallbacks: Vec<String>,
    /// Fallbacks for text-only requests
    #[validate(length(min = 1_u64, message = "must list at least one model"))]
    #[serde(default = "default_text_fallbacks")]
    pub text_fallbacks: Vec<String>,
}

impl Default for ModelDefaults {
    fn default() -> Self {
        Self { vision_fallbacks: default_vision_fallbacks(), text_fallbacks: default_text_fallbacks() }
    }
}

pub fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

pub const fn default_request_timeout() -> u64 {
    120
}

pub fn default_vision_fallbacks() -> Vec<String> {
    ["gemini-1.5-flash", "gemini-pro-vision", "gemini-1.0-pro-vision"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub fn default_text_fallbacks() -> Vec<String> {
    ["gemini-1.5-flash", "gemini-pro", "gemini-1.0-pro"].iter().map(ToString::to_string).collect()
}
