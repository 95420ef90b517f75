use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "creamlab-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: ready once an upstream API key is configured.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if state.api_key.is_some() {
        Ok(StatusCode::OK)
    } else {
        Err(AppError::ServiceUnavailable)
    }
}
