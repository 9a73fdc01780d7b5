//! Text embedding for document similarity search

use async_trait::async_trait;

use crate::{Error, Result};

/// Embedding dimension for all-MiniLM-L6-v2
pub const EMBEDDING_DIM: usize = 384;

/// Produces vector embeddings for text
///
/// Embedding is an implementation detail of the document store; nothing
/// outside the store layer handles raw vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

/// Embedder backed by a local sentence-embedding server
///
/// Speaks the text-embeddings-inference wire format: POST a JSON body of
/// `{"inputs": [...]}` and receive one vector per input.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: reqwest::Client,
    url: String,
}

impl HttpEmbedder {
    /// Create a new embedder targeting the given `/embed` endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the URL is empty
    pub fn new(url: String) -> Result<Self> {
        if url.is_empty() {
            return Err(Error::Config(
                "embedding server URL required".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            url,
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("empty embedding response".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        #[derive(serde::Serialize)]
        struct EmbedRequest<'a> {
            inputs: &'a [&'a str],
        }

        let request = EmbedRequest { inputs: texts };

        let response = self.client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "embedding server error {status}: {body}"
            )));
        }

        let embeddings: Vec<Vec<f32>> = response.json().await?;

        if embeddings.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        Ok(embeddings)
    }
}

/// Serialize embedding to bytes for `SQLite` storage
#[must_use]
pub fn to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_layout() {
        let embedding = vec![1.0, 2.5, -3.14, 0.0, 100.0];
        let bytes = to_bytes(&embedding);
        assert_eq!(bytes.len(), embedding.len() * 4);

        let restored: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
            .collect();
        assert_eq!(restored, embedding);
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = HttpEmbedder::new(String::new());
        assert!(result.is_err());
    }
}
