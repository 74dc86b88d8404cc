//! Application, upstream, and invoker configuration.

mod app;
mod hospitals;
mod invoker;
mod upstream;

pub use app::{AppConfig, ServerConfig};
pub use hospitals::HospitalConfig;
pub use invoker::InvokerConfig;
pub use upstream::{GeminiConfig, ModelDefaults};

use validator::{Validate, ValidationErrors};

use crate::error::ConfigError;

/// Run `validator` checks and surface the first failing field as a `ConfigError`.
pub(crate) fn validate_section<T: Validate>(section: &str, value: &T) -> Result<(), ConfigError> {
    value.validate().map_err(|errors| first_error(section, &errors))
}

fn first_error(section: &str, errors: &ValidationErrors) -> ConfigError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    match fields.first() {
        Some((field, errs)) => {
            let message = errs
                .first()
                .map(|e| e.message.as_ref().map_or_else(|| e.code.to_string(), ToString::to_string))
                .unwrap_or_else(|| "invalid value".to_string());
            ConfigError::invalid(format!("{}.{}", section, field), message)
        },
        None => ConfigError::invalid(section, errors.to_string()),
    }
}
