//! Résumé Q&A — orchestrates one question from validation to answer.
//!
//! Flow: validate → require capabilities → load corpus → rank → lock session
//!       → remember question → compose → LLM → remember answer.

use tracing::{debug, info};

use crate::chatbot::memory::ConversationTurn;
use crate::chatbot::prompts::compose;
use crate::chatbot::ranking::{build_context, rank, DEFAULT_TOP_K};
use crate::errors::AppError;
use crate::state::AppState;

const CONTEXT_LOG_PREVIEW: usize = 400;
const ANSWER_LOG_PREVIEW: usize = 300;

/// Answers `question` about the stored résumé within `session_id`'s history.
///
/// The session lock is held until the answer is remembered, so concurrent
/// questions on one session run one after another. A failed LLM call leaves
/// the question in memory without an answer.
pub async fn answer_question(
    state: &AppState,
    session_id: &str,
    question: &str,
) -> Result<String, AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::EmptyInput);
    }
    info!("User question: {question}");

    let embedder = state
        .embedder
        .as_deref()
        .ok_or(AppError::Uninitialized("Embedding model"))?;
    let completer = state
        .completer
        .as_deref()
        .ok_or(AppError::Uninitialized("LLM client"))?;

    let corpus = state.store.load().await?;
    let ranked = rank(embedder, question, &corpus, DEFAULT_TOP_K).await?;
    let context = build_context(&ranked);
    info!(
        "Selected boosted context ({} fragments): {}",
        ranked.len(),
        preview(&context, CONTEXT_LOG_PREVIEW)
    );

    let session = state.memory.session(session_id).await;
    let mut memory = session.lock().await;
    memory.append(ConversationTurn::user(question));
    debug!("Session {session_id} holds {} turns", memory.len());

    let messages = compose(&state.system_prompt, &memory.snapshot(), question, &context);
    let answer = completer
        .complete(&messages, &state.config.model_name)
        .await?;

    memory.append(ConversationTurn::assistant(answer.clone()));
    info!("Chatbot response: {}", preview(&answer, ANSWER_LOG_PREVIEW));

    Ok(answer)
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
