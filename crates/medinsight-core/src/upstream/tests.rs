use reqwest::StatusCode;

use medinsight_types::{GeminiConfig, ImageAttachment, MediaType, Request};

use super::{build_request_body, build_url, normalize_model_id, parse_error_response, GeminiClient};
use crate::invoker::{classify_message, ErrorClass, GenerativeModel, ModelProvider};

fn config(api_key: &str) -> GeminiConfig {
    GeminiConfig { api_key: api_key.to_string(), ..GeminiConfig::default() }
}

#[test]
fn test_build_url() {
    assert_eq!(
        build_url("https://generativelanguage.googleapis.com/v1beta/", "gemini-1.5-flash"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
    );
}

#[test]
fn test_normalize_model_id() {
    assert_eq!(normalize_model_id("models/gemini-pro").ok().as_deref(), Some("gemini-pro"));
    assert!(normalize_model_id("").is_err());
    assert!(normalize_model_id("gemini pro").is_err());
    assert!(normalize_model_id("../etc").is_err());
}

#[test]
fn test_body_puts_prompt_before_image() {
    let image = ImageAttachment::new(MediaType::Png, vec![1, 2, 3]);
    let body = build_request_body(&Request::with_image("describe", image));
    let json = serde_json::to_value(&body).expect("serializable body");

    assert_eq!(json["contents"][0]["role"], "user");
    assert_eq!(json["contents"][0]["parts"][0]["text"], "describe");
    assert_eq!(json["contents"][0]["parts"][1]["inline_data"]["mime_type"], "image/png");
    assert_eq!(json["contents"][0]["parts"][1]["inline_data"]["data"], "AQID");
}

#[test]
fn test_text_only_body_has_one_part() {
    let body = build_request_body(&Request::text("summarize"));
    assert_eq!(body.contents[0].parts.len(), 1);
}

#[test]
fn test_error_messages_classify_as_expected() {
    let quota = parse_error_response(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error":{"code":429,"message":"Resource has been exhausted (e.g. check quota).","status":"RESOURCE_EXHAUSTED"}}"#,
    );
    assert_eq!(quota.status, Some(429));
    assert_eq!(classify_message(&quota.to_string()), ErrorClass::RateLimited);

    let internal = parse_error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":{"code":500,"message":"An internal error has occurred.","status":"INTERNAL"}}"#,
    );
    assert_eq!(classify_message(&internal.to_string()), ErrorClass::TransientServer);

    let overloaded = parse_error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        r#"{"error":{"code":503,"message":"The model is overloaded. Please try again later.","status":"UNAVAILABLE"}}"#,
    );
    assert_eq!(classify_message(&overloaded.to_string()), ErrorClass::TransientServer);

    let invalid = parse_error_response(
        StatusCode::BAD_REQUEST,
        r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#,
    );
    assert_eq!(classify_message(&invalid.to_string()), ErrorClass::Fatal);
}

#[test]
fn test_non_json_error_body_is_kept() {
    let err = parse_error_response(StatusCode::BAD_GATEWAY, "upstream connect error");
    assert_eq!(err.to_string(), "502 Bad Gateway: upstream connect error");
}

#[test]
fn test_missing_api_key_fails_construction() {
    let client = GeminiClient::new(&config("")).expect("client builds without key");
    assert!(!client.has_api_key());
    let err = client.model("gemini-1.5-flash").err().expect("construction must fail");
    assert!(err.to_string().contains("API key"));
}

#[test]
fn test_invalid_model_fails_construction() {
    let client = GeminiClient::new(&config("test-key")).expect("client builds");
    assert!(client.model("bad model").is_err());
    let model = client.model("models/gemini-1.5-flash").expect("valid model");
    assert_eq!(model.model_id(), "gemini-1.5-flash");
}

#[test]
fn test_invalid_base_url_rejected() {
    let cfg = GeminiConfig { base_url: "not a url".to_string(), ..config("k") };
    assert!(GeminiClient::new(&cfg).is_err());
}

#[tokio::test]
async fn test_transport_error_omits_url() {
    // Nothing listens on port 1; the path carries a transient keyword.
    let cfg = GeminiConfig {
        base_url: "http://127.0.0.1:1/internal/v1beta".to_string(),
        ..config("test-key")
    };
    let client = GeminiClient::new(&cfg).expect("client builds");
    let model = client.model("gemini-1.5-flash").expect("valid model");

    let err = model.generate(&Request::text("hello")).await.expect_err("connection refused");
    let message = err.to_string();
    assert!(message.starts_with("transport error"), "message: {}", message);
    assert!(!message.contains("127.0.0.1"), "message: {}", message);
    assert_eq!(classify_message(&message), ErrorClass::Fatal);
}
