//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

const DEFAULT_FILTER: &str = "info";

/// Install the global fmt subscriber.
///
/// `level` accepts anything `EnvFilter` does (`debug`, `medinsight_core=trace,info`);
/// an unparsable value falls back to `info`.
pub fn init_logging(level: &str) -> AppResult<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|e| AppError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
