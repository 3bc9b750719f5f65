//! Text extraction for uploaded résumés. PDF goes through `pdf-extract`;
//! plain text is decoded as UTF-8.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Detects the document kind from upload metadata, falling back to the
    /// PDF magic bytes.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>, bytes: &[u8]) -> Option<Self> {
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match (extension.as_deref(), content_type) {
            (Some("pdf"), _) | (_, Some("application/pdf")) => Some(Self::Pdf),
            (Some("txt"), _) => Some(Self::PlainText),
            (_, Some(ct)) if ct.starts_with("text/plain") => Some(Self::PlainText),
            _ if bytes.starts_with(b"%PDF") => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Extracts raw text. A document that yields only whitespace is `EmptyDocument`.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, AppError> {
    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?,
        DocumentKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    if text.trim().is_empty() {
        return Err(AppError::EmptyDocument);
    }
    Ok(text)
}
