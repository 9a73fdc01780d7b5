//! Document repository for text and embedding persistence

use super::DbPool;
use crate::{Error, Result};

/// A document matched by vector search
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Document text
    pub text: String,
    /// Source label from the document's metadata
    pub source: String,
    /// Cosine distance to the query (lower is more similar)
    pub distance: f32,
}

/// Document repository for database operations
///
/// Scoped to a single named collection; all reads and writes are
/// filtered by it.
#[derive(Clone)]
pub struct DocumentRepo {
    pool: DbPool,
    collection: String,
}

impl DocumentRepo {
    /// Create a new document repository for a collection
    #[must_use]
    pub const fn new(pool: DbPool, collection: String) -> Self {
        Self { pool, collection }
    }

    /// Insert a batch of documents with their embeddings
    ///
    /// All rows are written in one transaction; a failure rolls the whole
    /// batch back.
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails or the input slices
    /// have differing lengths
    pub fn insert_batch(
        &self,
        ids: &[String],
        texts: &[String],
        sources: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        if ids.len() != texts.len() || ids.len() != sources.len() || ids.len() != embeddings.len() {
            return Err(Error::Database(format!(
                "batch insert slice lengths differ: {} ids, {} texts, {} sources, {} embeddings",
                ids.len(),
                texts.len(),
                sources.len(),
                embeddings.len()
            )));
        }

        let mut conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;
        let tx = conn.transaction()?;

        for (((id, text), source), embedding) in
            ids.iter().zip(texts).zip(sources).zip(embeddings)
        {
            tx.execute(
                "INSERT INTO documents (collection, id, text, source) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![self.collection, id, text, source],
            )?;

            // Vector rows need a globally unique key across collections
            let doc_key = format!("{}:{id}", self.collection);
            let embedding_bytes = super::embedder::to_bytes(embedding);
            tx.execute(
                "INSERT INTO documents_vec (doc_key, collection, embedding) VALUES (?1, ?2, ?3)",
                rusqlite::params![doc_key, self.collection, embedding_bytes],
            )?;
        }

        tx.commit()?;

        tracing::info!(
            collection = %self.collection,
            count = ids.len(),
            "documents inserted"
        );

        Ok(())
    }

    /// Number of documents in the collection
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn count(&self) -> Result<usize> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            rusqlite::params![self.collection],
            |row| row.get(0),
        )?;

        #[allow(clippy::cast_sign_loss)]
        let count = count as usize;
        Ok(count)
    }

    /// Search documents by vector similarity
    ///
    /// Returns up to `limit` hits ordered by ascending cosine distance
    /// (most similar first).
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn search(&self, embedding: &[f32], limit: usize) -> Result<Vec<SearchHit>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;
        let embedding_bytes = super::embedder::to_bytes(embedding);

        // The KNN subquery is partitioned by collection, so the limit is
        // spent entirely on this collection's vectors
        let mut stmt = conn.prepare(
            r"SELECT d.text, d.source, v.distance
              FROM documents d
              INNER JOIN (
                  SELECT doc_key, distance
                  FROM documents_vec
                  WHERE embedding MATCH ?1 AND collection = ?2
                  ORDER BY distance
                  LIMIT ?3
              ) v ON v.doc_key = d.collection || ':' || d.id
              WHERE d.collection = ?2
              ORDER BY v.distance",
        )?;

        #[allow(clippy::cast_possible_wrap)]
        let rows = stmt.query_map(
            rusqlite::params![embedding_bytes, self.collection, limit as i64],
            |row| {
                Ok(SearchHit {
                    text: row.get(0)?,
                    source: row.get(1)?,
                    distance: row.get(2)?,
                })
            },
        )?;

        let mut hits = Vec::new();
        for row in rows {
            hits.push(row?);
        }

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::embedder::EMBEDDING_DIM;
    use crate::db::init_memory;

    /// Unit-ish test vector with energy concentrated at `hot`
    fn test_embedding(hot: usize) -> Vec<f32> {
        let mut v = vec![0.01_f32; EMBEDDING_DIM];
        v[hot % EMBEDDING_DIM] = 1.0;
        v
    }

    fn test_repo() -> DocumentRepo {
        let pool = init_memory().unwrap();
        DocumentRepo::new(pool, "test".to_string())
    }

    #[test]
    fn test_insert_and_count() {
        let repo = test_repo();
        assert_eq!(repo.count().unwrap(), 0);

        repo.insert_batch(
            &["doc_0".to_string(), "doc_1".to_string()],
            &["First document".to_string(), "Second document".to_string()],
            &["one".to_string(), "two".to_string()],
            &[test_embedding(0), test_embedding(1)],
        )
        .unwrap();

        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_mismatched_batch_rejected() {
        let repo = test_repo();

        let result = repo.insert_batch(
            &["doc_0".to_string()],
            &["text".to_string(), "extra".to_string()],
            &["src".to_string()],
            &[test_embedding(0)],
        );
        assert!(result.is_err());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_search_orders_by_distance() {
        let repo = test_repo();

        repo.insert_batch(
            &["doc_0".to_string(), "doc_1".to_string(), "doc_2".to_string()],
            &[
                "About pools".to_string(),
                "About check-in".to_string(),
                "About wifi".to_string(),
            ],
            &["pool".to_string(), "check-in".to_string(), "wifi".to_string()],
            &[test_embedding(10), test_embedding(20), test_embedding(30)],
        )
        .unwrap();

        let hits = repo.search(&test_embedding(20), 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].source, "check-in");
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn test_search_limit_caps_results() {
        let repo = test_repo();

        repo.insert_batch(
            &["doc_0".to_string(), "doc_1".to_string()],
            &["a".to_string(), "b".to_string()],
            &["one".to_string(), "two".to_string()],
            &[test_embedding(0), test_embedding(1)],
        )
        .unwrap();

        let hits = repo.search(&test_embedding(0), 1).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_search_not_truncated_by_closer_vectors_elsewhere() {
        let pool = init_memory().unwrap();
        let repo_a = DocumentRepo::new(pool.clone(), "a".to_string());
        let repo_b = DocumentRepo::new(pool, "b".to_string());

        let query = test_embedding(0);

        // Collection b holds three exact matches for the query vector
        repo_b
            .insert_batch(
                &["doc_0".to_string(), "doc_1".to_string(), "doc_2".to_string()],
                &["b one".to_string(), "b two".to_string(), "b three".to_string()],
                &["b1".to_string(), "b2".to_string(), "b3".to_string()],
                &[query.clone(), query.clone(), query.clone()],
            )
            .unwrap();

        // Collection a holds two farther vectors
        repo_a
            .insert_batch(
                &["doc_0".to_string(), "doc_1".to_string()],
                &["a one".to_string(), "a two".to_string()],
                &["a1".to_string(), "a2".to_string()],
                &[test_embedding(5), test_embedding(6)],
            )
            .unwrap();

        // The limit must be spent on collection a, not on b's closer matches
        let hits = repo_a.search(&query, 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.source.starts_with("a")));
    }

    #[test]
    fn test_same_ids_allowed_in_different_collections() {
        let pool = init_memory().unwrap();
        let repo_a = DocumentRepo::new(pool.clone(), "a".to_string());
        let repo_b = DocumentRepo::new(pool, "b".to_string());

        for repo in [&repo_a, &repo_b] {
            repo.insert_batch(
                &["doc_0".to_string()],
                &["text".to_string()],
                &["src".to_string()],
                &[test_embedding(0)],
            )
            .unwrap();
        }

        assert_eq!(repo_a.count().unwrap(), 1);
        assert_eq!(repo_b.count().unwrap(), 1);
    }

    #[test]
    fn test_collections_are_isolated() {
        let pool = init_memory().unwrap();
        let repo_a = DocumentRepo::new(pool.clone(), "a".to_string());
        let repo_b = DocumentRepo::new(pool, "b".to_string());

        repo_a
            .insert_batch(
                &["doc_0".to_string()],
                &["only in a".to_string()],
                &["src".to_string()],
                &[test_embedding(0)],
            )
            .unwrap();

        assert_eq!(repo_a.count().unwrap(), 1);
        assert_eq!(repo_b.count().unwrap(), 0);
    }
}
