//! Report generation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown to users when every candidate model has been exhausted.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate report. Please try again.";

/// Errors surfaced while turning user input into a generated report.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ReportError {
    /// Report kind name not recognised
    #[error("Unknown report kind: {kind}")]
    UnknownKind { kind: String },

    /// Image report requested without an image
    #[error("Report kind {kind} requires an image")]
    MissingImage { kind: String },

    /// Text analysis requested without report text
    #[error("Report kind {kind} requires report text")]
    MissingReportText { kind: String },

    /// Uploaded payload is empty
    #[error("Uploaded file {file_name} is empty")]
    EmptyUpload { file_name: String },

    /// Uploaded payload exceeds the size limit
    #[error("Uploaded file {file_name} is too large ({size} bytes, limit {limit})")]
    UploadTooLarge { file_name: String, size: usize, limit: usize },

    /// Uploaded file is not a supported image format
    #[error("Unsupported media type for {file_name}")]
    UnsupportedMedia { file_name: String },

    /// Uploaded PDF could not be parsed
    #[error("Could not read PDF {file_name}: {reason}")]
    UnreadablePdf { file_name: String, reason: String },

    /// Uploaded PDF parsed but holds no text layer
    #[error("PDF {file_name} contains no extractable text")]
    EmptyPdf { file_name: String },

    /// Recommendation requested without a report analysis
    #[error("A report analysis is required for hospital recommendations")]
    MissingAnalysis,

    /// Model candidate list was empty after normalisation
    #[error("No candidate models configured")]
    NoCandidates,

    /// All candidates exhausted; the detail is kept for logs only
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    GenerationFailed { last_error: String },
}

impl ReportError {
    /// Check if this error was caused by bad user input (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::GenerationFailed { .. } | Self::NoCandidates)
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::UnknownKind { .. } => 404,
            Self::UploadTooLarge { .. } => 413,
            Self::UnsupportedMedia { .. } => 415,
            Self::MissingImage { .. }
            | Self::MissingReportText { .. }
            | Self::MissingAnalysis
            | Self::EmptyUpload { .. }
            | Self::UnreadablePdf { .. }
            | Self::EmptyPdf { .. } => 400,
            Self::NoCandidates => 500,
            Self::GenerationFailed { .. } => 502,
        }
    }
}
