use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};
use service_core::observability::render_metrics;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub placid_api_configured: bool,
    pub template_configured: bool,
}

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Placid API Backend is running" }))
}

/// Reports configuration presence only; it never calls Placid.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        placid_api_configured: state.placid.is_configured(),
        template_configured: state.placid.template_configured(),
    })
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_metrics(),
    )
}
