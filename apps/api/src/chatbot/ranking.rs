//! Similarity Ranker — cosine similarity over the résumé corpus with a fixed
//! keyword boost for achievement-style lines.
//!
//! Two-stage selection:
//! 1. take the `k` fragments with the highest raw cosine score
//! 2. add `BOOST_BONUS` to any of those mentioning a boost keyword,
//!    re-sort, and keep the best `MAX_CONTEXT_FRAGMENTS`
//!
//! Boosted scores may exceed 1.0. All sorts are stable, so equal scores keep
//! document order.

use serde::Serialize;

use crate::embeddings::Embedder;
use crate::errors::AppError;
use crate::resume::Corpus;

/// Candidates considered per question before boosting.
pub const DEFAULT_TOP_K: usize = 8;
/// Fragments handed to the prompt after boosting.
pub const MAX_CONTEXT_FRAGMENTS: usize = 4;
pub const BOOST_BONUS: f32 = 0.15;
pub const BOOST_KEYWORDS: [&str; 8] = [
    "project",
    "developed",
    "built",
    "created",
    "implemented",
    "designed",
    "skills",
    "experience",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub score: f32,
    pub text: String,
}

/// Embeds `query` and ranks the corpus against it.
///
/// Fails with `EmptyCorpus` before touching the embedder when there is nothing
/// to rank.
pub async fn rank(
    embedder: &dyn Embedder,
    query: &str,
    corpus: &Corpus,
    k: usize,
) -> Result<Vec<RankedResult>, AppError> {
    if corpus.is_empty() {
        return Err(AppError::EmptyCorpus);
    }
    let query_embedding = embedder.embed(query).await?;
    Ok(rank_by_embedding(&query_embedding, corpus, k))
}

pub fn rank_by_embedding(query: &[f32], corpus: &Corpus, k: usize) -> Vec<RankedResult> {
    let mut candidates: Vec<(usize, f32)> = corpus
        .embeddings
        .iter()
        .take(corpus.texts.len())
        .map(|embedding| cosine_similarity(query, embedding))
        .enumerate()
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(k.min(corpus.texts.len()));

    let mut results: Vec<RankedResult> = candidates
        .into_iter()
        .map(|(idx, score)| {
            let text = &corpus.texts[idx];
            RankedResult {
                score: score + boost_for(text),
                text: text.clone(),
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(MAX_CONTEXT_FRAGMENTS);
    results
}

/// Newline-joined fragment texts in ranked order.
pub fn build_context(results: &[RankedResult]) -> String {
    results
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn boost_for(text: &str) -> f32 {
    let lower = text.to_lowercase();
    if BOOST_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        BOOST_BONUS
    } else {
        0.0
    }
}

/// Cosine similarity, or 0.0 for mismatched dimensions or a zero-norm vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
