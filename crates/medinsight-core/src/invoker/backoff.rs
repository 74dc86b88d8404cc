//! Retry strategy selection and delay computation.

use rand::Rng;
use std::time::Duration;

use medinsight_types::{AttemptOutcome, InvokerConfig};

/// Strategy for retrying a failed attempt against the same model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryStrategy {
    /// Abandon the current model.
    NoRetry,
    /// Retry after a fixed delay.
    FixedDelay(Duration),
    /// Retry after `base * 2^attempt` plus a uniform random addend.
    ExponentialBackoff {
        /// Delay before the first retry.
        base: Duration,
        /// Upper bound of the random addend.
        jitter_max: Duration,
    },
}

/// Pick the strategy for an attempt outcome.
///
/// Rate limits back off exponentially; transient server errors and empty
/// responses wait a flat `base_delay`; everything else is not retried.
pub fn determine_retry_strategy(outcome: &AttemptOutcome, config: &InvokerConfig) -> RetryStrategy {
    match outcome {
        AttemptOutcome::RateLimited(_) => RetryStrategy::ExponentialBackoff {
            base: config.base_delay(),
            jitter_max: config.jitter_max(),
        },
        AttemptOutcome::TransientServerError(_) | AttemptOutcome::Empty => {
            RetryStrategy::FixedDelay(config.base_delay())
        },
        AttemptOutcome::FatalError(_) | AttemptOutcome::Success(_) => RetryStrategy::NoRetry,
    }
}

impl RetryStrategy {
    /// Delay before the retry that follows attempt index `attempt`, or `None` for `NoRetry`.
    pub fn delay(&self, attempt: u32) -> Option<Duration> {
        match *self {
            Self::NoRetry => None,
            Self::FixedDelay(delay) => Some(delay),
            Self::ExponentialBackoff { base, jitter_max } => {
                Some(exponential_delay(base, attempt).saturating_add(jitter(jitter_max)))
            },
        }
    }
}

/// `base * 2^attempt`, saturating instead of overflowing.
pub fn exponential_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt))
}

/// Uniform random duration in `[0, max]`, at millisecond resolution.
pub fn jitter(max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
}
