//! Errors raised by a single call to the generative service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error from one model construction or one generate call.
///
/// The rendered message is what the invoker classifies, so HTTP failures
/// carry their status code as a prefix (`"429 Too Many Requests: ..."`).
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("{}", render(.status, .message))]
pub struct UpstreamError {
    /// HTTP status returned by the service, if the call got that far
    pub status: Option<u16>,
    /// Human-readable failure description
    pub message: String,
}

impl UpstreamError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { status: None, message: message.into() }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self { status: Some(status), message: message.into() }
    }
}

fn render(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("{} {}", status, message),
        None => message.to_string(),
    }
}

impl From<String> for UpstreamError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for UpstreamError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefix() {
        let err = UpstreamError::with_status(503, "The model is overloaded");
        assert_eq!(err.to_string(), "503 The model is overloaded");
    }

    #[test]
    fn test_plain_message() {
        let err = UpstreamError::from("invalid argument");
        assert_eq!(err.to_string(), "invalid argument");
        assert_eq!(err.status, None);
    }
}
