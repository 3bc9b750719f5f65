mod chatbot;
mod config;
mod embeddings;
mod errors;
mod llm_client;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embeddings::{Embedder, OpenAiEmbedder};
use crate::llm_client::{Completer, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values; keys are optional)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    let embedder = build_embedder(&config);
    let completer = build_completer(&config);

    let state = AppState::new(config.clone(), embedder, completer);
    info!("Corpus store: {}", state.store.path().display());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// A capability that fails to initialize is logged and left `None`; requests
/// that need it are rejected until restart.
fn build_embedder(config: &Config) -> Option<Arc<dyn Embedder>> {
    let Some(api_key) = config.embedding_api_key.clone() else {
        error!("EMBEDDING_API_KEY missing; embedding model not loaded");
        return None;
    };
    match OpenAiEmbedder::new(
        api_key,
        &config.embedding_base_url,
        config.embedding_model.clone(),
    ) {
        Ok(embedder) => {
            info!("Embedding client initialized (model: {})", config.embedding_model);
            Some(Arc::new(embedder))
        }
        Err(e) => {
            error!("Error initializing embedding client: {e}");
            None
        }
    }
}

fn build_completer(config: &Config) -> Option<Arc<dyn Completer>> {
    let Some(api_key) = config.llm_api_key.clone() else {
        error!("LLM_API_KEY missing; LLM client not initialized");
        return None;
    };
    match LlmClient::new(api_key, &config.llm_base_url) {
        Ok(client) => {
            info!("LLM client initialized (model: {})", config.model_name);
            Some(Arc::new(client))
        }
        Err(e) => {
            error!("Error initializing LLM client: {e}");
            None
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
