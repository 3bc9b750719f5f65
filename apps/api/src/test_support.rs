//! Deterministic doubles for the embedding and completion capabilities.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::embeddings::{Embedder, EmbeddingError};
use crate::llm_client::{ChatMessage, Completer, LlmError};
use crate::state::AppState;

const TEST_VOCABULARY: [&str; 8] = [
    "payment", "caching", "search", "rust", "python", "team", "service", "database",
];

/// Bag-of-words embedder: component `i` counts occurrences of vocabulary word `i`.
pub struct VocabEmbedder {
    vocabulary: Vec<&'static str>,
}

impl Default for VocabEmbedder {
    fn default() -> Self {
        Self {
            vocabulary: TEST_VOCABULARY.to_vec(),
        }
    }
}

impl VocabEmbedder {
    fn vectorize(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        self.vocabulary
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect()
    }
}

#[async_trait]
impl Embedder for VocabEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }
}

/// `VocabEmbedder` that counts how often it is called.
#[derive(Default)]
pub struct CountingEmbedder {
    inner: VocabEmbedder,
    calls: AtomicUsize,
}

impl CountingEmbedder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for CountingEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed_batch(texts).await
    }
}

/// Returns one vector fewer than requested.
pub struct ShortEmbedder;

#[async_trait]
impl Embedder for ShortEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().skip(1).map(|_| vec![1.0]).collect())
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::Api {
            status: 500,
            message: "embedding backend unavailable".to_string(),
        })
    }
}

/// Answers every call with a fixed text and records what it was sent.
pub struct RecordingCompleter {
    answer: String,
    calls: Mutex<Vec<(Vec<ChatMessage>, String)>>,
}

impl RecordingCompleter {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.calls.lock().unwrap().last().unwrap().0.clone()
    }

    pub fn last_model(&self) -> String {
        self.calls.lock().unwrap().last().unwrap().1.clone()
    }
}

#[async_trait]
impl Completer for RecordingCompleter {
    async fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), model.to_string()));
        Ok(self.answer.clone())
    }
}

pub struct FailingCompleter;

#[async_trait]
impl Completer for FailingCompleter {
    async fn complete(&self, _messages: &[ChatMessage], _model: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }
}

pub fn test_config(data_dir: &Path) -> Config {
    Config {
        port: 0,
        rust_log: "debug".to_string(),
        data_dir: data_dir.to_path_buf(),
        llm_api_key: None,
        llm_base_url: "http://localhost:0".to_string(),
        model_name: "llama-3.3-70b-versatile".to_string(),
        embedding_api_key: None,
        embedding_base_url: "http://localhost:0".to_string(),
        embedding_model: "test-embedding".to_string(),
        portfolio_owner: "Jane Doe".to_string(),
        cors_origins: Vec::new(),
    }
}

/// State backed by `data_dir`, a `VocabEmbedder`, and the given completer.
pub fn test_state(data_dir: &Path, completer: Option<Arc<dyn Completer>>) -> AppState {
    AppState::new(
        test_config(data_dir),
        Some(Arc::new(VocabEmbedder::default())),
        completer,
    )
}
