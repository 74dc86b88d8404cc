//! # MedInsight Types
//!
//! Core types, models, and error definitions for MedInsight.
//!
//! This crate provides the foundational type system for the MedInsight workspace:
//!
//! - **`error`** - Typed error hierarchy for upstream calls, reports, and configuration
//! - **`models`** - Domain models (Request, ModelCandidates, outcomes, config, report kinds)
//! - **`protocol`** - Gemini GenerateContent wire types
//!
//! ## Architecture Role
//!
//! `medinsight-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!          medinsight-types (this crate)
//!                   │
//!                   ▼
//!           medinsight-core
//!                   │
//!                   ▼
//!          medinsight-server
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for API responses and config files
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;
pub mod protocol;

// Re-export error types for convenience
pub use error::{
    ConfigError, ReportError, Result, TypedError, UpstreamError, GENERATION_FAILED_MESSAGE,
};

// Re-export core model types
pub use models::{
    AppConfig, AttemptOutcome, CarePreferences, ExportFormat, GeminiConfig, HospitalConfig,
    ImageAttachment, InvocationResult, InvokerConfig, MediaType, ModelCandidates, ModelDefaults,
    PatientInfo, ReportKind, Request, ServerConfig,
};
