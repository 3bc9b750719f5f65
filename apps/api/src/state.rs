use std::sync::Arc;

use crate::chatbot::memory::ConversationMemory;
use crate::chatbot::prompts::persona_system_prompt;
use crate::config::Config;
use crate::embeddings::Embedder;
use crate::llm_client::Completer;
use crate::resume::store::CorpusStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: CorpusStore,
    pub memory: Arc<ConversationMemory>,
    /// `None` when the embedding client failed to initialize at startup.
    pub embedder: Option<Arc<dyn Embedder>>,
    /// `None` when the LLM client failed to initialize at startup.
    pub completer: Option<Arc<dyn Completer>>,
    pub system_prompt: Arc<str>,
}

impl AppState {
    pub fn new(
        config: Config,
        embedder: Option<Arc<dyn Embedder>>,
        completer: Option<Arc<dyn Completer>>,
    ) -> Self {
        Self {
            store: CorpusStore::new(&config.data_dir),
            memory: Arc::new(ConversationMemory::default()),
            system_prompt: persona_system_prompt(&config.portfolio_owner).into(),
            embedder,
            completer,
            config,
        }
    }
}
