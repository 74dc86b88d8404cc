//! # MedInsight Core
//!
//! Report generation against the Gemini API with retry and model fallback.
//!
//! ```text
//! medinsight-core/src/
//! ├── invoker/    # ResilientInvoker: classify, back off, fall through candidates
//! ├── upstream/   # GeminiClient: ModelProvider over generateContent
//! ├── reports/    # ReportService, prompts, recommendations, text/PDF export
//! └── modules/    # config.json persistence, logging
//! ```

#![allow(
    clippy::redundant_else,
    reason = "Explicit else blocks improve readability in complex control flow"
)]
#![allow(clippy::map_err_ignore, reason = "Error context is provided in the replacement message")]
#![allow(clippy::needless_continue, reason = "Explicit continue improves loop readability")]
// Test-only lints: allow panic!, println!, etc. in test code
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::indexing_slicing,
        clippy::assertions_on_result_states
    )
)]

pub mod error;
pub mod invoker;
pub mod modules;
pub mod reports;
pub mod upstream;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use invoker::{GenerativeModel, ModelProvider, ResilientInvoker};
pub use reports::{
    HospitalRecommendation, RecommendationInput, ReportDocument, ReportInput, ReportService,
};
pub use upstream::GeminiClient;
