#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test — panics are the assertion mechanism")]

use medinsight_core::{
    GeminiClient, GenerativeModel, ModelProvider, RecommendationInput, ReportService,
    ResilientInvoker,
};
use medinsight_types::{
    CarePreferences, GeminiConfig, ImageAttachment, InvocationResult, InvokerConfig, MediaType,
    ModelCandidates, ModelDefaults, Request,
};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gemini_success_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{"text": text}],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    })
}

fn gemini_error_body(code: u16, message: &str, status: &str) -> serde_json::Value {
    serde_json::json!({"error": {"code": code, "message": message, "status": status}})
}

fn client_for(server: &MockServer) -> GeminiClient {
    let config = GeminiConfig {
        api_key: "test-key".to_string(),
        base_url: format!("{}/v1beta", server.uri()),
        ..GeminiConfig::default()
    };
    GeminiClient::new(&config).expect("client builds")
}

fn fast_invoker(client: GeminiClient) -> ResilientInvoker<GeminiClient> {
    ResilientInvoker::new(client, InvokerConfig { max_retries: 2, base_delay_ms: 1, jitter_max_ms: 0 })
}

fn model_path(model: &str) -> String {
    format!("/v1beta/models/{}:generateContent", model)
}

fn candidates(ids: &[&str]) -> ModelCandidates {
    ModelCandidates::new(ids.iter().copied()).expect("non-empty")
}

#[tokio::test]
async fn test_single_call_sends_key_and_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-1.5-flash")))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{"text": "describe"}, {"inline_data": {"mime_type": "image/jpeg"}}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_body("Normal study.")))
        .expect(1)
        .mount(&server)
        .await;

    let model = client_for(&server).model("gemini-1.5-flash").expect("model");
    let image = ImageAttachment::new(MediaType::Jpeg, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    let text = model.generate(&Request::with_image("describe", image)).await.expect("200 response");

    assert_eq!(text, "Normal study.");
}

#[tokio::test]
async fn test_rate_limited_model_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-2.0-flash-lite")))
        .respond_with(ResponseTemplate::new(429).set_body_json(gemini_error_body(
            429,
            "Resource has been exhausted (e.g. check quota).",
            "RESOURCE_EXHAUSTED",
        )))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-1.5-flash")))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_body("fallback text")))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = fast_invoker(client_for(&server));
    let result = invoker
        .invoke(&Request::text("analyze"), &candidates(&["gemini-2.0-flash-lite", "gemini-1.5-flash"]))
        .await;

    assert_eq!(result, InvocationResult::Success("fallback text".to_string()));
}

#[tokio::test]
async fn test_bad_request_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-pro")))
        .respond_with(ResponseTemplate::new(400).set_body_json(gemini_error_body(
            400,
            "API key not valid. Please pass a valid API key.",
            "INVALID_ARGUMENT",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = fast_invoker(client_for(&server));
    let result = invoker.invoke(&Request::text("analyze"), &candidates(&["gemini-pro"])).await;

    let last_error = result.last_error().expect("exhausted");
    assert!(last_error.contains("API key not valid"), "last error: {}", last_error);
    assert!(last_error.contains("INVALID_ARGUMENT"));
}

#[tokio::test]
async fn test_internal_error_is_retried_on_same_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-1.5-flash")))
        .respond_with(ResponseTemplate::new(500).set_body_json(gemini_error_body(
            500,
            "An internal error has occurred.",
            "INTERNAL",
        )))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-1.5-flash")))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_body("second try")))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = fast_invoker(client_for(&server));
    let result = invoker.invoke(&Request::text("analyze"), &candidates(&["gemini-1.5-flash"])).await;

    assert_eq!(result.into_text().as_deref(), Some("second try"));
}

#[tokio::test]
async fn test_empty_candidates_are_retried_then_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-1.5-flash")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})))
        .expect(3)
        .mount(&server)
        .await;

    let invoker = fast_invoker(client_for(&server));
    let result = invoker.invoke(&Request::text("analyze"), &candidates(&["gemini-1.5-flash"])).await;

    assert_eq!(
        result,
        InvocationResult::Exhausted("empty response from gemini-1.5-flash".to_string())
    );
}

#[tokio::test]
async fn test_missing_key_never_reaches_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let config = GeminiConfig {
        api_key: String::new(),
        base_url: format!("{}/v1beta", server.uri()),
        ..GeminiConfig::default()
    };
    let invoker = fast_invoker(GeminiClient::new(&config).expect("client builds"));
    let result = invoker.invoke(&Request::text("analyze"), &candidates(&["gemini-1.5-flash"])).await;

    assert!(result.last_error().is_some_and(|e| e.contains("API key")));
}

#[tokio::test]
async fn test_function_call_only_reply_counts_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-1.5-flash")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"functionCall": {"name": "lookup", "args": {}}}]}}]
        })))
        .expect(3)
        .mount(&server)
        .await;

    let result = fast_invoker(client_for(&server))
        .invoke(&Request::text("summarize"), &candidates(&["gemini-1.5-flash"]))
        .await;

    match result {
        InvocationResult::Exhausted(last_error) => {
            assert!(last_error.contains("empty response"), "last error: {}", last_error);
        },
        InvocationResult::Success(text) => panic!("unexpected success: {}", text),
    }
}

#[tokio::test]
async fn test_recommendation_pipeline_makes_two_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-1.5-flash")))
        .and(body_string_contains("MEDICAL REPORT:"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_success_body("6. RECOMMENDED SPECIALTIES: Orthopedics")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(model_path("gemini-1.5-flash")))
        .and(body_string_contains("REPORT ANALYSIS:"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_success_body("1. Ortho Care Hospital")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = ReportService::new(
        client_for(&server),
        InvokerConfig { max_retries: 1, base_delay_ms: 1, jitter_max_ms: 0 },
        ModelDefaults::default(),
    );
    let input = RecommendationInput {
        report_text: Some("X-ray left femur: displaced fracture.".to_string()),
        preferences: CarePreferences { budget: Some("Economy".to_string()), emergency: true },
        ..RecommendationInput::default()
    };

    let rec = service.recommend(input).await.expect("recommendation");
    assert_eq!(rec.analysis, "6. RECOMMENDED SPECIALTIES: Orthopedics");
    assert_eq!(rec.recommendations, "1. Ortho Care Hospital");
}
