//! Application State
//!
//! Holds the report service shared by every handler.

use std::sync::Arc;

use medinsight_core::{ModelProvider, ReportService};
use medinsight_types::AppConfig;

/// Type-erased provider so handlers do not carry a generic parameter.
pub type SharedProvider = Arc<dyn ModelProvider>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<ReportService<SharedProvider>>,
}

impl AppState {
    pub fn new(provider: SharedProvider, config: &AppConfig) -> Self {
        Self { inner: Arc::new(ReportService::from_config(provider, config)) }
    }

    pub fn reports(&self) -> &ReportService<SharedProvider> {
        &self.inner
    }
}
