//! Gemini client against a mock HTTP server

mod common;

use common::init_test_logging;
use complexity_common::{AnalyzerError, ModelConfig};
use complexity_engine::{GeminiClient, ModelClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn client_for(server: &MockServer, api_key: Option<&str>) -> GeminiClient {
    let config = ModelConfig {
        api_key: api_key.map(str::to_string),
        endpoint: format!("{}/", server.uri()),
        ..ModelConfig::default()
    };
    GeminiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_generate_returns_first_text_part() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "analyze this"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other candidate"}]}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("test-key"));
    assert!(client.has_credential());
    assert_eq!(client.model(), "gemini-2.5-flash");

    let text = client.generate("analyze this").await.unwrap();
    assert_eq!(text, "first");
}

#[tokio::test]
async fn test_no_candidates_is_upstream_error() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("k")).generate("p").await.unwrap_err();

    assert!(matches!(err, AnalyzerError::Upstream(_)));
    assert!(err.to_string().contains("no response from model"));
}

#[tokio::test]
async fn test_empty_parts_is_upstream_error() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": []}}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("k")).generate("p").await.unwrap_err();
    assert!(err.to_string().contains("no response from model"));
}

#[tokio::test]
async fn test_http_error_status_is_upstream_error() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("k")).generate("p").await.unwrap_err();

    assert!(matches!(err, AnalyzerError::Upstream(_)));
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("internal"));
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("   "));
    assert!(!client.has_credential());

    let err = client.generate("p").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::Configuration(_)));
}
