//! Document store contract and sqlite-vec implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::db::{DocumentRepo, Embedder};

/// Metadata attached to a stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Source label identifying where the document came from
    pub source: String,
}

impl DocumentMetadata {
    /// Create metadata with the given source label
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// A document retrieved by similarity search
#[derive(Debug, Clone)]
pub struct Retrieved {
    /// Document text
    pub text: String,
    /// Document metadata
    pub metadata: DocumentMetadata,
}

/// Vector search backend for documents
///
/// Similarity metric is cosine; embedding is an implementation detail of
/// the store, callers only exchange text.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Add a batch of documents with parallel metadata and identifiers
    async fn add(
        &self,
        documents: &[String],
        metadatas: &[DocumentMetadata],
        ids: &[String],
    ) -> Result<()>;

    /// Return up to `limit` documents most similar to `text`, most
    /// similar first
    async fn query(&self, text: &str, limit: usize) -> Result<Vec<Retrieved>>;

    /// Number of documents in the store
    async fn count(&self) -> Result<usize>;
}

/// Document store backed by `SQLite` with sqlite-vec similarity search
///
/// Owns the embedder; documents are embedded on insert and queries are
/// embedded on read.
pub struct VectorStore {
    repo: DocumentRepo,
    embedder: Box<dyn Embedder>,
}

impl VectorStore {
    /// Create a vector store over a document repository and embedder
    #[must_use]
    pub fn new(repo: DocumentRepo, embedder: Box<dyn Embedder>) -> Self {
        Self { repo, embedder }
    }
}

#[async_trait]
impl DocumentStore for VectorStore {
    async fn add(
        &self,
        documents: &[String],
        metadatas: &[DocumentMetadata],
        ids: &[String],
    ) -> Result<()> {
        let texts: Vec<&str> = documents.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let sources: Vec<String> = metadatas.iter().map(|m| m.source.clone()).collect();
        self.repo.insert_batch(ids, documents, &sources, &embeddings)
    }

    async fn query(&self, text: &str, limit: usize) -> Result<Vec<Retrieved>> {
        let embedding = self.embedder.embed(text).await?;
        let hits = self.repo.search(&embedding, limit)?;

        Ok(hits
            .into_iter()
            .map(|hit| Retrieved {
                text: hit.text,
                metadata: DocumentMetadata::new(hit.source),
            })
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        self.repo.count()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::db::EMBEDDING_DIM;
    use crate::db::init_memory;

    /// Deterministic offline embedder: hashes word tokens into vector
    /// dimensions, so texts sharing words land near each other
    struct HashEmbedder;

    fn hash_embed(text: &str) -> Vec<f32> {
        let mut v = vec![0.0_f32; EMBEDDING_DIM];
        for token in text.to_lowercase().split_whitespace() {
            let token: String = token.chars().filter(|c| c.is_alphanumeric()).collect();
            if token.is_empty() {
                continue;
            }
            let mut h: u64 = 1469598103934665603;
            for b in token.bytes() {
                h ^= u64::from(b);
                h = h.wrapping_mul(1099511628211);
            }
            #[allow(clippy::cast_possible_truncation)]
            let dim = (h % EMBEDDING_DIM as u64) as usize;
            v[dim] += 1.0;
        }
        // sqlite-vec cosine distance rejects zero vectors
        if v.iter().all(|x| *x == 0.0) {
            v[0] = 1.0;
        }
        v
    }

    #[async_trait]
    impl Embedder for HashEmbedder {
        async fn embed(&self, text: &str) -> crate::Result<Vec<f32>> {
            Ok(hash_embed(text))
        }

        async fn embed_batch(&self, texts: &[&str]) -> crate::Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| hash_embed(t)).collect())
        }
    }

    fn test_store() -> VectorStore {
        let pool = init_memory().unwrap();
        let repo = crate::db::DocumentRepo::new(pool, "test".to_string());
        VectorStore::new(repo, Box::new(HashEmbedder))
    }

    #[tokio::test]
    async fn test_add_and_count() {
        let store = test_store();
        assert_eq!(store.count().await.unwrap(), 0);

        store
            .add(
                &["The pool opens at 6 AM".to_string()],
                &[DocumentMetadata::new("pool info")],
                &["doc_0".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_query_returns_keyword_relevant_document() {
        let store = test_store();

        store
            .add(
                &[
                    "Check-in time is 3 PM and check-out is 11 AM".to_string(),
                    "The swimming pool is on the 5th floor".to_string(),
                    "Free WiFi is available throughout the hotel".to_string(),
                ],
                &[
                    DocumentMetadata::new("check-in policy"),
                    DocumentMetadata::new("pool info"),
                    DocumentMetadata::new("wifi info"),
                ],
                &["doc_0".to_string(), "doc_1".to_string(), "doc_2".to_string()],
            )
            .await
            .unwrap();

        let hits = store.query("What time is check-in?", 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].metadata.source, "check-in policy");
    }

    #[tokio::test]
    async fn test_query_respects_limit() {
        let store = test_store();

        store
            .add(
                &["one".to_string(), "two".to_string(), "three".to_string()],
                &[
                    DocumentMetadata::new("a"),
                    DocumentMetadata::new("b"),
                    DocumentMetadata::new("c"),
                ],
                &["doc_0".to_string(), "doc_1".to_string(), "doc_2".to_string()],
            )
            .await
            .unwrap();

        let hits = store.query("one two", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_query_empty_store() {
        tokio_test::block_on(async {
            let store = test_store();
            let hits = store.query("anything", 3).await.unwrap();
            assert!(hits.is_empty());
        });
    }
}
