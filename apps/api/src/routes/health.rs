use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Backend is live" }))
}

/// GET /health
/// Reports service version, which capabilities initialized, and whether a
/// résumé has been ingested.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let resume_updated_at = state.store.last_modified().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portfolio-api",
        "embedder_ready": state.embedder.is_some(),
        "llm_ready": state.completer.is_some(),
        "resume_loaded": resume_updated_at.is_some(),
        "resume_updated_at": resume_updated_at,
        "active_sessions": state.memory.session_count().await,
    }))
}
