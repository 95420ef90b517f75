//! End-to-end tests of the relay against a stubbed Gemini-compatible upstream.

mod common;

use common::*;
use creamlab_relay::models::Preference;
use creamlab_relay::services::providers::gemini::GeminiProvider;
use creamlab_relay::services::{generate_recipe, RelayError, RelaySettings};
use secrecy::Secret;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn preference() -> Preference {
    serde_json::from_value(preference_body()).unwrap()
}

fn key() -> Secret<String> {
    Secret::new(TEST_API_KEY.to_string())
}

fn provider(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(format!("{}/v1beta", server.uri()))
}

#[tokio::test]
async fn fenced_upstream_text_becomes_stamped_recipe() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "```json\n{\"recipeName\":\"X\"}\n```" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let recipe = generate_recipe(&provider(&server), Some(&key()), &settings(), &preference())
        .await
        .unwrap();

    assert_eq!(recipe.draft.recipe_name, "X");
    assert!(!recipe.id.is_empty());
    assert!((recipe.timestamp - chrono::Utc::now().timestamp_millis()).abs() < 5_000);
}

#[tokio::test]
async fn request_carries_prompt_schema_and_system_instruction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user" }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "OBJECT" }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": recipe_json().to_string() }] } }],
                "usageMetadata": { "promptTokenCount": 420, "candidatesTokenCount": 380 }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let recipe = generate_recipe(&provider(&server), Some(&key()), &settings(), &preference())
        .await
        .unwrap();
    assert_eq!(recipe.draft.steps.len(), 3);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("草莓, 马斯卡彭, 柠檬"));
    assert!(prompt.contains("轻盈如云"));
    assert!(prompt.contains("甜: 60%"));
    assert!(body["systemInstruction"]["parts"][0]["text"].is_string());
}

#[tokio::test]
async fn missing_key_sends_nothing_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = generate_recipe(&provider(&server), None, &settings(), &preference())
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Configuration(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = generate_recipe(&provider(&server), Some(&key()), &settings(), &preference())
        .await
        .unwrap_err();

    match &err {
        RelayError::Upstream { status, body } => {
            assert_eq!(*status, 403);
            assert_eq!(body, "API key not valid");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn success_without_text_is_structural_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })))
        .mount(&server)
        .await;

    let err = generate_recipe(&provider(&server), Some(&key()), &settings(), &preference())
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Structural(_)));
}

#[tokio::test]
async fn non_json_success_body_is_transport_error_without_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = generate_recipe(&provider(&server), Some(&key()), &settings(), &preference())
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Transport(_)));
    assert!(!err.to_string().contains(TEST_API_KEY));
}

#[tokio::test]
async fn image_call_adds_data_url_and_tolerates_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"recipeName\":\"Yuzu\"}" }] } }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash-image:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "data": "iVBORw0KGgo=" } }
            ] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = RelaySettings {
        image_model: Some("gemini-2.5-flash-image".to_string()),
        ..settings()
    };
    let recipe = generate_recipe(&provider(&server), Some(&key()), &settings, &preference())
        .await
        .unwrap();

    assert_eq!(
        recipe.image_url.as_deref(),
        Some("data:image/png;base64,iVBORw0KGgo=")
    );

    // A failing image model leaves the recipe intact
    let broken = RelaySettings {
        image_model: Some("missing-image-model".to_string()),
        ..settings
    };
    let recipe = generate_recipe(&provider(&server), Some(&key()), &broken, &preference())
        .await
        .unwrap();

    assert_eq!(recipe.draft.recipe_name, "Yuzu");
    assert!(recipe.image_url.is_none());
}
