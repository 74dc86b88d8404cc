//! Error message classification.
//!
//! Matching is a case-insensitive substring test. Underscores are folded to
//! spaces first so Google status names (`RESOURCE_EXHAUSTED`) hit the same
//! patterns as their prose form.

use medinsight_types::AttemptOutcome;

/// Substrings marking a quota / rate-limit failure.
pub const RATE_LIMIT_PATTERNS: &[&str] = &["quota exceeded", "429", "resource exhausted"];

/// Substrings marking a transient server-side failure.
pub const TRANSIENT_PATTERNS: &[&str] = &["internal", "overloaded"];

/// Error category, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    RateLimited,
    TransientServer,
    Fatal,
}

fn normalize(message: &str) -> String {
    message.to_lowercase().replace('_', " ")
}

/// Classify an error message. Rate-limit patterns win over transient ones.
pub fn classify_message(message: &str) -> ErrorClass {
    let normalized = normalize(message);
    if RATE_LIMIT_PATTERNS.iter().any(|p| normalized.contains(p)) {
        ErrorClass::RateLimited
    } else if TRANSIENT_PATTERNS.iter().any(|p| normalized.contains(p)) {
        ErrorClass::TransientServer
    } else {
        ErrorClass::Fatal
    }
}

/// Turn an error message into the matching failed `AttemptOutcome`.
pub fn outcome_for_error(message: impl Into<String>) -> AttemptOutcome {
    let message = message.into();
    match classify_message(&message) {
        ErrorClass::RateLimited => AttemptOutcome::RateLimited(message),
        ErrorClass::TransientServer => AttemptOutcome::TransientServerError(message),
        ErrorClass::Fatal => AttemptOutcome::FatalError(message),
    }
}
