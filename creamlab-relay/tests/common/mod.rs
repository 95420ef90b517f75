#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use creamlab_relay::services::providers::mock::{MockProvider, MockReply};
use creamlab_relay::services::RelaySettings;
use creamlab_relay::startup::{build_router, AppState};
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEXT_MODEL: &str = "gemini-2.5-flash";

pub fn settings() -> RelaySettings {
    RelaySettings {
        text_model: TEXT_MODEL.to_string(),
        image_model: None,
    }
}

pub fn state(provider: Arc<MockProvider>, api_key: Option<&str>) -> AppState {
    AppState {
        provider,
        api_key: api_key.map(|key| Secret::new(key.to_string())),
        settings: settings(),
    }
}

pub fn router(provider: Arc<MockProvider>, api_key: Option<&str>) -> Router {
    build_router(state(provider, api_key), None)
}

/// A complete preference payload as the client sends it.
pub fn preference_body() -> Value {
    json!({
        "ingredients": "草莓, 马斯卡彭, 柠檬",
        "flavorLevels": { "甜": 60, "酸": 45, "苦": 0, "辣": 0, "咸": 10 },
        "texture": "轻盈如云"
    })
}

/// A complete recipe as the upstream model would write it.
pub fn recipe_json() -> Value {
    json!({
        "recipeName": "草莓柠檬云朵奶油",
        "summary": "酸甜清爽，十分钟就能完成。",
        "ingredients": [
            { "item": "淡奶油", "amount": "200ml" },
            { "item": "马斯卡彭", "amount": "100g" },
            { "item": "草莓", "amount": "6颗" }
        ],
        "steps": [
            "淡奶油冷藏后打至六分发。",
            "加入马斯卡彭继续打至纹路清晰。",
            "拌入草莓碎和少许柠檬皮屑。"
        ],
        "textureTips": "全程保持低温，奶油才会轻盈。",
        "pairingSuggestions": "搭配戚风蛋糕或松饼。",
        "flavorProfile": {
            "sweetness": 62,
            "acidity": 45,
            "complexity": 30,
            "creaminess": 88,
            "innovation": 55
        }
    })
}

pub async fn post(app: Router, uri: &str, body: &Value) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    read_json(post(app, uri, body).await).await
}

pub async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// A provider that must never be called.
pub fn idle_provider() -> Arc<MockProvider> {
    Arc::new(MockProvider::new(Vec::<MockReply>::new()))
}
