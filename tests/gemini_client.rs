//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use serde_json::json;
use voyageai::config::GeminiConfig;
use voyageai::{GeminiClient, GenerativeModel, VoyageError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeminiClient {
    let config = GeminiConfig {
        api_key: Some("gemini-test-key".to_string()),
        base_url: format!("{base_url}/v1beta"),
        model: "gemini-1.5-pro".to_string(),
        timeout_seconds: 5,
    };
    GeminiClient::new(&config).expect("client construction should not fail")
}

#[tokio::test]
async fn test_generate_returns_first_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .and(header("x-goog-api-key", "gemini-test-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Where should I eat?"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Try Time Out Market."}]},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client
        .generate("Where should I eat?")
        .await
        .expect("should return text");
    assert_eq!(text, "Try Time Out Market.");
}

#[tokio::test]
async fn test_generate_reports_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.generate("hi").await.unwrap_err();
    assert!(matches!(err, VoyageError::Api { status: 429, .. }));
    assert!(err.user_message().contains("quota"));
}

#[tokio::test]
async fn test_generate_without_candidates_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.generate("hi").await.unwrap_err();
    assert!(matches!(err, VoyageError::InvalidResponse { .. }));
}
