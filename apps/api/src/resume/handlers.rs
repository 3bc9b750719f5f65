//! Axum route handler for résumé upload.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::extract::{extract_text, DocumentKind};
use crate::resume::ingest::ingest;
use crate::state::AppState;

/// Multipart field carrying the résumé file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub fragments: usize,
    pub ingested_at: DateTime<Utc>,
}

struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /resume/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let embedder = state
        .embedder
        .clone()
        .ok_or(AppError::Uninitialized("Embedding model"))?;

    let upload = read_file_field(multipart).await?;
    info!(
        "Received resume file: {} ({} bytes)",
        upload.file_name.as_deref().unwrap_or("<unnamed>"),
        upload.data.len()
    );

    let kind = DocumentKind::detect(
        upload.file_name.as_deref(),
        upload.content_type.as_deref(),
        &upload.data,
    )
    .ok_or_else(|| {
        AppError::Validation("Unsupported file type. Upload a PDF or plain-text resume.".into())
    })?;

    let data = upload.data;
    let raw_text = tokio::task::spawn_blocking(move || extract_text(kind, &data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Text extraction task failed: {e}")))??;

    let fragments = ingest(&raw_text, embedder.as_ref(), &state.store).await?;

    Ok(Json(UploadResponse {
        message: "Resume uploaded and embeddings saved successfully.".to_string(),
        fragments,
        ingested_at: Utc::now(),
    }))
}

async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
