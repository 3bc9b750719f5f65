// Resume corpus: ingestion, persistence, and the upload endpoint.
// The corpus is a single slot: every upload replaces the previous résumé.

pub mod extract;
pub mod handlers;
pub mod ingest;
pub mod store;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The searchable form of one résumé: fragment texts and their embeddings as
/// two parallel sequences. `embeddings[i]` is the vector for `texts[i]`.
///
/// This is also the persisted layout: a single record with exactly these two
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub texts: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Truncates both sequences to the shorter length so indices stay aligned.
    /// Lossy but deterministic; a corrupted store degrades instead of failing.
    pub fn repair_alignment(&mut self) {
        let (texts, embeddings) = (self.texts.len(), self.embeddings.len());
        if texts == embeddings {
            return;
        }
        warn!("Mismatch: {embeddings} embeddings vs {texts} texts. Truncating to the shorter.");
        let min_len = texts.min(embeddings);
        self.texts.truncate(min_len);
        self.embeddings.truncate(min_len);
    }
}
