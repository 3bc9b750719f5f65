use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::embeddings::EmbeddingError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant aborts the current request only; none is fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Message cannot be empty")]
    EmptyInput,

    #[error("{0} is not initialized")]
    Uninitialized(&'static str),

    #[error("No resume found. Please upload your resume first.")]
    NotFound,

    #[error("Stored resume data is invalid: {0}")]
    CorruptStore(String),

    #[error("Resume embeddings are empty")]
    EmptyCorpus,

    #[error("Could not extract any usable text from the resume")]
    EmptyDocument,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Upstream(format!("LLM completion failed: {e}"))
    }
}

impl From<EmbeddingError> for AppError {
    fn from(e: EmbeddingError) -> Self {
        AppError::Upstream(format!("Embedding failed: {e}"))
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
            AppError::Uninitialized(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "UNINITIALIZED_CAPABILITY")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::CorruptStore(_) => (StatusCode::BAD_REQUEST, "CORRUPT_STORE"),
            AppError::EmptyCorpus => (StatusCode::BAD_REQUEST, "EMPTY_CORPUS"),
            AppError::EmptyDocument => (StatusCode::BAD_REQUEST, "EMPTY_DOCUMENT"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::CorruptStore(detail) => {
                tracing::warn!("Corrupt corpus store: {detail}");
                "Invalid resume embeddings structure. Please upload your resume again.".to_string()
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                "An AI processing error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
