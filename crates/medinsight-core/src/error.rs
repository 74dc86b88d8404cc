//! Unified error types for MedInsight Core.

use serde::Serialize;
use thiserror::Error;

use medinsight_types::{ConfigError, ReportError, UpstreamError};

/// Main error type for all MedInsight operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Network request failed (HTTP client).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// File system I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report input was rejected or generation was exhausted.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// The generative service returned an error.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// PDF document could not be assembled.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Logging subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for MedInsight operations.
pub type AppResult<T> = Result<T, AppError>;
