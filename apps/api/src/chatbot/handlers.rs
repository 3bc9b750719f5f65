use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::chatbot::assistant::answer_question;
use crate::chatbot::memory::DEFAULT_SESSION;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub message: String,
    /// Conversation to continue; omitted or blank uses the shared default session.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
    pub session_id: String,
}

/// POST /chatbot/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let session_id = req
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .to_string();

    let span = tracing::info_span!("ask", request_id = %Uuid::new_v4(), session = %session_id);
    let response = answer_question(&state, &session_id, &req.message)
        .instrument(span)
        .await?;

    Ok(Json(AskResponse {
        response,
        session_id,
    }))
}
