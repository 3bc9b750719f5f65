use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::resume::Corpus;

const CORPUS_FILE_NAME: &str = "resume_embeddings.json";

/// Single-slot, file-backed corpus store.
///
/// Holds exactly one corpus at a fixed path under the data directory. Writes go
/// to a temp file in the same directory and are renamed into place, so readers
/// see either the old corpus or the new one, never texts from one and
/// embeddings from the other.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    path: PathBuf,
}

impl CorpusStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(CORPUS_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored corpus and realigns texts with embeddings.
    ///
    /// `NotFound` when nothing has been ingested yet; `CorruptStore` when the
    /// file is unreadable or lacks either field.
    pub async fn load(&self) -> Result<Corpus, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(AppError::NotFound),
            Err(e) => {
                return Err(AppError::Internal(anyhow::Error::new(e).context(format!(
                    "Failed to read corpus at {}",
                    self.path.display()
                ))))
            }
        };

        let mut corpus: Corpus =
            serde_json::from_slice(&bytes).map_err(|e| AppError::CorruptStore(e.to_string()))?;
        corpus.repair_alignment();

        debug!("Loaded corpus with {} fragments", corpus.len());
        Ok(corpus)
    }

    /// Replaces the stored corpus.
    pub async fn save(&self, corpus: Corpus) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(&corpus).context("Failed to serialize corpus")?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .context("Corpus write task panicked")??;

        info!("Resume embeddings saved at: {}", self.path.display());
        Ok(())
    }

    /// When the stored corpus was last written, if one exists.
    pub async fn last_modified(&self) -> Option<DateTime<Utc>> {
        let metadata = tokio::fs::metadata(&self.path).await.ok()?;
        metadata.modified().ok().map(DateTime::<Utc>::from)
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .context("Corpus path has no parent directory")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir).context("Failed to create temp file")?;
    tmp.write_all(bytes).context("Failed to write corpus")?;
    tmp.as_file().sync_all().context("Failed to flush corpus")?;
    tmp.persist(path)
        .with_context(|| format!("Failed to move corpus into {}", path.display()))?;
    Ok(())
}
