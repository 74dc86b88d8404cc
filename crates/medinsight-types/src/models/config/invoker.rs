//! Retry and backoff settings for the resilient invoker.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Bounds for one invocation: attempts per candidate and wait times.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct InvokerConfig {
    /// Retries per candidate after the first attempt (total = max_retries + 1)
    #[validate(range(max = 10_u32, message = "must be at most 10"))]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff delay in milliseconds
    #[validate(range(min = 1_u64, max = 60_000_u64, message = "must be between 1 and 60000"))]
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Upper bound of the random addend on rate-limit backoff, in milliseconds
    #[validate(range(max = 10_000_u64, message = "must be at most 10000"))]
    #[serde(default = "default_jitter_max_ms")]
    pub jitter_max_ms: u64,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            jitter_max_ms: default_jitter_max_ms(),
        }
    }
}

impl InvokerConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn jitter_max(&self) -> Duration {
        Duration::from_millis(self.jitter_max_ms)
    }

    /// Attempts made against each candidate before moving on.
    pub fn attempts_per_candidate(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

pub const fn default_max_retries() -> u32 {
    5
}

pub const fn default_base_delay_ms() -> u64 {
    2000
}

pub const fn default_jitter_max_ms() -> u64 {
    1000
}
