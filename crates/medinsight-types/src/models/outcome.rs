//! Per-attempt and per-invocation outcomes.

use serde::{Deserialize, Serialize};

/// Result of one call against one candidate model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Non-empty text came back
    Success(String),
    /// The call succeeded but produced no text
    Empty,
    /// Quota / 429 / resource exhausted
    RateLimited(String),
    /// Internal or overloaded service error
    TransientServerError(String),
    /// Anything else; not worth retrying on this model
    FatalError(String),
}

impl AttemptOutcome {
    /// Whether another attempt against the same model may help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Empty | Self::RateLimited(_) | Self::TransientServerError(_))
    }

    /// Error text carried by a failed outcome.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::RateLimited(msg) | Self::TransientServerError(msg) | Self::FatalError(msg) => {
                Some(msg)
            },
            Self::Success(_) | Self::Empty => None,
        }
    }
}

/// Final outcome of a full invocation. The only value exposed to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum InvocationResult {
    Success(String),
    Exhausted(String),
}

impl InvocationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Generated text, or `None` when every candidate was exhausted.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Success(text) => Some(text),
            Self::Exhausted(_) => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Exhausted(err) => Some(err),
        }
    }
}
