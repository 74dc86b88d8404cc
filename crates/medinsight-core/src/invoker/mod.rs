//! Resilient multi-model invoker.
//!
//! Turns one [`Request`] into one [`InvocationResult`] by walking an ordered
//! candidate list, retrying each model on rate limits (exponential backoff
//! plus jitter) and transient server errors (flat delay), and stopping at
//! the first non-empty text.
//!
//! ```text
//! for model in candidates:
//!     construct ─ fail ─► next model (no retry consumed)
//!     attempt 0..=max_retries:
//!         text        ─► Success
//!         rate limit  ─► sleep base·2^n + jitter, retry
//!         transient   ─► sleep base, retry
//!         empty text  ─► sleep base, retry
//!         fatal       ─► next model
//! Exhausted(last error)
//! ```

mod backoff;
mod classify;


pub use backoff::{determine_retry_strategy, exponential_delay, jitter, RetryStrategy};
pub use classify::{
    classify_message, outcome_for_error, ErrorClass, RATE_LIMIT_PATTERNS, TRANSIENT_PATTERNS,
};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use medinsight_types::{
    AttemptOutcome, InvocationResult, InvokerConfig, ModelCandidates, Request, UpstreamError,
};

/// A constructed handle to one backend model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn model_id(&self) -> &str;

    /// Issue the request once. `Ok` may carry empty text.
    async fn generate(&self, request: &Request) -> Result<String, UpstreamError>;
}

/// Builds model handles by identifier.
pub trait ModelProvider: Send + Sync {
    fn model(&self, model_id: &str) -> Result<Box<dyn GenerativeModel>, UpstreamError>;
}

impl<P: ModelProvider + ?Sized> ModelProvider for Arc<P> {
    fn model(&self, model_id: &str) -> Result<Box<dyn GenerativeModel>, UpstreamError> {
        (**self).model(model_id)
    }
}

/// Stateless between calls; one instance can serve concurrent invocations.
pub struct ResilientInvoker<P> {
    provider: P,
    config: InvokerConfig,
}

impl<P: ModelProvider> ResilientInvoker<P> {
    pub fn new(provider: P, config: InvokerConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run the request against the candidates until one yields text.
    pub async fn invoke(
        &self,
        request: &Request,
        candidates: &ModelCandidates,
    ) -> InvocationResult {
        let attempts = self.config.attempts_per_candidate();
        let mut last_error: Option<String> = None;

        for model_id in candidates.iter() {
            let model = match self.provider.model(model_id) {
                Ok(model) => model,
                Err(e) => {
                    warn!("Failed to create model {}: {}", model_id, e);
                    last_error = Some(e.to_string());
                    continue;
                },
            };
            info!("Using model: {}", model.model_id());

            for attempt in 0..attempts {
                let outcome = run_attempt(model.as_ref(), request).await;

                if let AttemptOutcome::Success(text) = outcome {
                    if attempt > 0 || model_id != candidates.first() {
                        info!(
                            "Model {} succeeded after fallback (attempt {}/{})",
                            model_id,
                            attempt + 1,
                            attempts
                        );
                    }
                    return InvocationResult::Success(text);
                }

                let message = outcome
                    .error_message()
                    .map_or_else(|| format!("empty response from {}", model_id), str::to_string);

                let strategy = determine_retry_strategy(&outcome, &self.config);
                let Some(delay) = strategy.delay(attempt) else {
                    warn!("Error generating with {}, not retrying: {}", model_id, message);
                    last_error = Some(message);
                    break;
                };
                last_error = Some(message);

                if attempt + 1 >= attempts {
                    warn!(
                        "Model {} still failing after {} attempts, trying next candidate",
                        model_id, attempts
                    );
                    break;
                }

                warn!(
                    "{} on {}. Retrying in {:.1} seconds... (Attempt {}/{})",
                    outcome_label(&outcome),
                    model_id,
                    delay.as_secs_f64(),
                    attempt + 1,
                    attempts
                );
                sleep(delay).await;
            }
        }

        let last_error = last_error.unwrap_or_else(|| "no candidate model was usable".to_string());
        error!("All {} candidate models exhausted: {}", candidates.len(), last_error);
        InvocationResult::Exhausted(last_error)
    }
}

/// One call, mapped onto an outcome. Whitespace-only text counts as empty.
async fn run_attempt(model: &dyn GenerativeModel, request: &Request) -> AttemptOutcome {
    match model.generate(request).await {
        Ok(text) if text.trim().is_empty() => {
            debug!("Model {} returned empty text", model.model_id());
            AttemptOutcome::Empty
        },
        Ok(text) => AttemptOutcome::Success(text),
        Err(e) => outcome_for_error(e.to_string()),
    }
}

fn outcome_label(outcome: &AttemptOutcome) -> &'static str {
    match outcome {
        AttemptOutcome::RateLimited(_) => "Rate limit exceeded",
        AttemptOutcome::TransientServerError(_) => "Server error",
        AttemptOutcome::Empty => "Empty response",
        AttemptOutcome::FatalError(_) => "Fatal error",
        AttemptOutcome::Success(_) => "Success",
    }
}
