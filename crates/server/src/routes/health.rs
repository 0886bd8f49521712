//! Health check endpoint

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::AppState;
use crate::ai::ClaudeClient;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    /// Whether chat and prescription reading are enabled
    chat_enabled: bool,
    /// Whether a fleet backend is configured (demo fleet otherwise)
    fleet_backend: bool,
}

/// GET /health - Report server health and configured integrations
pub async fn check(
    State(state): State<AppState>,
    Extension(llm): Extension<Option<ClaudeClient>>,
) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        chat_enabled: llm.is_some(),
        fleet_backend: state.fleet.has_backend(),
    })
}
