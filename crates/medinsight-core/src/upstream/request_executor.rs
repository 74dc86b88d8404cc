use base64::Engine;
use reqwest::StatusCode;

use medinsight_types::protocol::{
    GeminiContent, GeminiErrorEnvelope, GeminiInlineData, GeminiPart, GeminiRole,
    GenerateContentRequest,
};
use medinsight_types::{Request, UpstreamError};

/// Longest raw error body echoed into an error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

pub fn build_url(base_url: &str, model_id: &str) -> String {
    format!("{}/models/{}:generateContent", base_url.trim_end_matches('/'), model_id)
}

/// Strip an optional `models/` prefix and reject identifiers that cannot form a URL path segment.
pub fn normalize_model_id(model_id: &str) -> Result<String, UpstreamError> {
    let id = model_id.trim();
    let id = id.strip_prefix("models/").unwrap_or(id);
    if id.is_empty() {
        return Err(UpstreamError::new("model name is empty"));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_')) {
        return Err(UpstreamError::new(format!("invalid model name: {}", model_id)));
    }
    Ok(id.to_string())
}

/// Prompt first, then the image as inline base64 data.
pub fn build_request_body(request: &Request) -> GenerateContentRequest {
    let mut parts = vec![GeminiPart::Text { text: request.prompt().to_string() }];
    if let Some(image) = request.image() {
        parts.push(GeminiPart::InlineData {
            inline_data: GeminiInlineData {
                mime_type: image.media_type().mime().to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(image.data()),
            },
        });
    }
    GenerateContentRequest { contents: vec![GeminiContent { role: Some(GeminiRole::User), parts }] }
}

/// Render a non-2xx response as `"<reason>: <message> [<STATUS>]"` with the HTTP code attached.
pub fn parse_error_response(status: StatusCode, body: &str) -> UpstreamError {
    let reason = status.canonical_reason().unwrap_or("Upstream Error");

    let message = match serde_json::from_str::<GeminiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{}: {} [{}]", reason, envelope.error.message, code),
            None => format!("{}: {}", reason, envelope.error.message),
        },
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                reason.to_string()
            } else {
                let snippet: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
                format!("{}: {}", reason, snippet)
            }
        },
    };

    UpstreamError::with_status(status.as_u16(), message)
}
