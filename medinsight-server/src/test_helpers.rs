//! Test helpers for medinsight-server unit tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use medinsight_core::{GenerativeModel, ModelProvider, ReportDocument};
use medinsight_types::{AppConfig, InvokerConfig, PatientInfo, ReportKind, Request, UpstreamError};

use crate::state::AppState;

type Prompts = Arc<Mutex<Vec<String>>>;

/// Provider whose every model returns the same reply.
pub struct FixedProvider {
    reply: Result<String, UpstreamError>,
    calls: Arc<AtomicUsize>,
    prompts: Prompts,
}

impl FixedProvider {
    pub fn text(text: &str) -> Self {
        Self { reply: Ok(text.to_string()), calls: Arc::default(), prompts: Arc::default() }
    }

    pub fn failing(message: &str) -> Self {
        Self { reply: Err(UpstreamError::new(message)), calls: Arc::default(), prompts: Arc::default() }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Prompts received so far, in call order.
    pub fn prompt_log(&self) -> Prompts {
        Arc::clone(&self.prompts)
    }
}

struct FixedModel {
    id: String,
    reply: Result<String, UpstreamError>,
    calls: Arc<AtomicUsize>,
    prompts: Prompts,
}

#[async_trait]
impl GenerativeModel for FixedModel {
    fn model_id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, request: &Request) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt().to_string());
        }
        self.reply.clone()
    }
}

impl ModelProvider for FixedProvider {
    fn model(&self, model_id: &str) -> Result<Box<dyn GenerativeModel>, UpstreamError> {
        Ok(Box::new(FixedModel {
            id: model_id.to_string(),
            reply: self.reply.clone(),
            calls: Arc::clone(&self.calls),
            prompts: Arc::clone(&self.prompts),
        }))
    }
}

/// Create an `AppState` over `provider` with millisecond backoff.
pub fn test_app_state(provider: FixedProvider) -> AppState {
    let mut config = AppConfig::default();
    config.invoker = InvokerConfig { max_retries: 1, base_delay_ms: 1, jitter_max_ms: 0 };
    AppState::new(Arc::new(provider), &config)
}

/// Smallest byte string recognised as a PNG.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

/// A small PDF whose text layer contains `text`.
pub fn pdf_with_text(text: &str) -> Vec<u8> {
    let at = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid timestamp");
    ReportDocument::new(ReportKind::ReportAnalysis, text, PatientInfo::default(), at)
        .render_pdf()
        .expect("fixture pdf")
}

pub const BOUNDARY: &str = "medinsight-test-boundary";

/// A multipart part: `(name, file_name, bytes)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

/// Encode parts as a `multipart/form-data` body using [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
