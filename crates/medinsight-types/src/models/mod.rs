//! Core domain models for MedInsight.
//!
//! This module contains all shared data structures used across the workspace.

mod candidates;
pub mod config;
mod outcome;
mod report;
mod request;

// Re-export all models
pub use candidates::ModelCandidates;
pub use config::{
    AppConfig, GeminiConfig, HospitalConfig, InvokerConfig, ModelDefaults, ServerConfig,
};
pub use outcome::{AttemptOutcome, InvocationResult};
pub use report::{CarePreferences, ExportFormat, PatientInfo, ReportKind};
pub use request::{ImageAttachment, MediaType, Request, MAX_IMAGE_BYTES};
