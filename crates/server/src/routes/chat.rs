//! Chat endpoint: LLM routing over the booking services

use axum::{Extension, Json, extract::State, response::IntoResponse};

use careline_core::{ChatReply, ChatRequest};

use crate::AppState;
use crate::ai::{ClaudeClient, router};
use crate::error::AppError;

/// POST /chat - One conversation turn
///
/// Looks up the session history, runs the agentic loop (which may invoke
/// the booking services as tools), stores the updated history, and
/// returns the reply with the session id for the next turn.
pub async fn post(
    State(state): State<AppState>,
    Extension(llm): Extension<Option<ClaudeClient>>,
    Json(body): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let client = llm.ok_or_else(|| {
        AppError::ServiceUnavailable("chat requires ANTHROPIC_API_KEY to be configured".to_string())
    })?;

    if body.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    tracing::info!(session = ?body.session_id, "Chat request");

    let (session_id, history) = state.sessions.history(body.session_id);

    let (messages, reply) = router::chat(&client, &state.fleet, history, &body.message)
        .await
        .map_err(|e| AppError::Internal(format!("chat failed: {e}")))?;

    state.sessions.store(session_id, messages);

    Ok(Json(ChatReply { session_id, reply }))
}
