//! Typed error definitions for MedInsight.
//!
//! This module provides a structured error hierarchy with specific error types
//! for different domains. All errors are designed to be:
//!
//! - **Serializable** for API responses via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants

mod config;
mod report;
mod upstream;

pub use config::ConfigError;
pub use report::{ReportError, GENERATION_FAILED_MESSAGE};
pub use upstream::UpstreamError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps an error returned by the generative service
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Wraps a report generation error
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;
