use tracing::info;

use crate::embeddings::{Embedder, EmbeddingError};
use crate::errors::AppError;
use crate::resume::store::CorpusStore;
use crate::resume::Corpus;

/// Lines with this many words or fewer are headers, bullets or noise.
const MIN_FRAGMENT_WORDS: usize = 3;

/// Splits extracted text into fragments: trimmed, non-empty lines with more
/// than three whitespace-separated words, in document order.
pub fn split_fragments(raw_text: &str) -> Vec<String> {
    raw_text
        .lines()
        .map(str::trim)
        .filter(|line| line.split_whitespace().count() > MIN_FRAGMENT_WORDS)
        .map(String::from)
        .collect()
}

/// Builds a corpus from raw document text.
///
/// Fails with `EmptyDocument` before any embedding work when nothing survives
/// filtering.
pub async fn build_corpus(raw_text: &str, embedder: &dyn Embedder) -> Result<Corpus, AppError> {
    let texts = split_fragments(raw_text);
    if texts.is_empty() {
        return Err(AppError::EmptyDocument);
    }

    let embeddings = embedder.embed_batch(&texts).await?;
    if embeddings.len() != texts.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: texts.len(),
            received: embeddings.len(),
        }
        .into());
    }

    Ok(Corpus { texts, embeddings })
}

/// Builds a corpus and writes it to the store, replacing the previous one.
/// Returns the number of fragments stored.
pub async fn ingest(
    raw_text: &str,
    embedder: &dyn Embedder,
    store: &CorpusStore,
) -> Result<usize, AppError> {
    let corpus = build_corpus(raw_text, embedder).await?;
    let fragments = corpus.len();
    store.save(corpus).await?;
    info!("Resume ingested: {fragments} fragments");
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingEmbedder, ShortEmbedder, VocabEmbedder};

    #[test]
    fn test_short_and_blank_lines_dropped() {
        let raw = "Jane Doe\n\n  Built a payment service  \nCoffee\nSkills: Rust, Go\nImplemented caching layer for search";
        assert_eq!(
            split_fragments(raw),
            vec![
                "Built a payment service".to_string(),
                "Implemented caching layer for search".to_string(),
            ]
        );
    }

    #[test]
    fn test_exactly_three_words_dropped() {
        assert!(split_fragments("one two three").is_empty());
        assert_eq!(split_fragments("one two three four").len(), 1);
    }

    #[test]
    fn test_windows_line_endings() {
        let raw = "Designed the billing platform end to end\r\nLed a team of five\r\n";
        assert_eq!(split_fragments(raw).len(), 2);
    }

    #[tokio::test]
    async fn test_corpus_aligned_with_embeddings() {
        let raw = "Built a payment service\nCoffee\nImplemented caching layer for search";
        let corpus = build_corpus(raw, &VocabEmbedder::default()).await.unwrap();
        assert_eq!(corpus.texts.len(), 2);
        assert_eq!(corpus.embeddings.len(), corpus.texts.len());
    }

    #[tokio::test]
    async fn test_noise_only_document_fails_before_embedding() {
        let embedder = CountingEmbedder::default();
        let result = build_corpus("Jane Doe\nRésumé\n\n- Rust\n", &embedder).await;
        assert!(matches!(result, Err(AppError::EmptyDocument)));
        assert_eq!(embedder.calls(), 0, "Embedder must not be called");
    }

    #[tokio::test]
    async fn test_empty_text_fails() {
        let result = build_corpus("", &VocabEmbedder::default()).await;
        assert!(matches!(result, Err(AppError::EmptyDocument)));
    }

    #[tokio::test]
    async fn test_embedder_count_mismatch_is_upstream_failure() {
        let result = build_corpus("Built a payment service end to end", &ShortEmbedder).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_ingest_overwrites_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(dir.path());
        let embedder = VocabEmbedder::default();

        ingest("Built a payment service for merchants", &embedder, &store)
            .await
            .unwrap();
        let count = ingest(
            "Designed a search engine in Rust\nCreated the caching layer for search",
            &embedder,
            &store,
        )
        .await
        .unwrap();

        assert_eq!(count, 2);
        let loaded = store.load().await.unwrap();
        assert_eq!(
            loaded.texts,
            vec![
                "Designed a search engine in Rust".to_string(),
                "Created the caching layer for search".to_string(),
            ]
        );
    }
}
