//! Knowledge base orchestrator: retrieval, context assembly, generation

use std::fmt::Write;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::generate::{AnswerGenerator, MAX_ANSWER_TOKENS};
use super::store::{DocumentMetadata, DocumentStore};
use crate::Result;

/// Answer returned when no grounding documents exist
///
/// The generator is never invoked in that case, so an ungrounded answer
/// cannot be hallucinated.
pub const FALLBACK_ANSWER: &str =
    "I don't have any information about that in my knowledge base.";

/// Default number of supporting documents retrieved per query
pub const DEFAULT_RESULTS: usize = 3;

/// System instruction for voice-appropriate answers
const SYSTEM_PROMPT: &str = "\
You are a helpful voice assistant. Answer questions based on the provided context.

Rules:
- Be conversational and natural - your response will be spoken aloud
- Keep answers concise (2-4 sentences ideal for voice)
- If the context doesn't contain the answer, say so briefly
- Don't use markdown formatting, bullet points, or numbered lists
- Don't say \"according to the source\" - just answer naturally";

/// Result of a knowledge base query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Generated answer text
    pub answer: String,
    /// Source labels of the supporting documents, most relevant first
    pub sources: Vec<String>,
}

/// Retrieval-augmented knowledge base
///
/// Composes a document store and an answer generator into a single
/// `query(question) -> answer + sources` operation. Both collaborators are
/// injected, so tests can substitute in-memory fakes.
pub struct KnowledgeBase {
    store: Arc<dyn DocumentStore>,
    generator: Arc<dyn AnswerGenerator>,
    // Serializes the read-count-then-insert sequence so concurrent adds
    // cannot assign duplicate identifiers
    write_lock: Mutex<()>,
}

impl KnowledgeBase {
    /// Create a knowledge base over a document store and answer generator
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, generator: Arc<dyn AnswerGenerator>) -> Self {
        Self {
            store,
            generator,
            write_lock: Mutex::new(()),
        }
    }

    /// Add documents to the knowledge base
    ///
    /// When `metadatas` is omitted, each text gets a placeholder source
    /// label `doc_<i>` from its offset within this batch. Identifiers are
    /// `doc_<count + i>` where `count` is the store size when the batch
    /// starts, so ids within one batch are contiguous.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::LengthMismatch`] if `metadatas` is provided
    /// with a different length than `texts`; store failures propagate
    pub async fn add_documents(
        &self,
        texts: &[String],
        metadatas: Option<Vec<DocumentMetadata>>,
    ) -> Result<()> {
        if texts.is_empty() {
            return Ok(());
        }

        if let Some(ref metadatas) = metadatas {
            if metadatas.len() != texts.len() {
                return Err(crate::Error::LengthMismatch {
                    texts: texts.len(),
                    metadatas: metadatas.len(),
                });
            }
        }

        let metadatas = metadatas.unwrap_or_else(|| {
            (0..texts.len())
                .map(|i| DocumentMetadata::new(format!("doc_{i}")))
                .collect()
        });

        let _guard = self.write_lock.lock().await;

        let count = self.store.count().await?;
        let ids: Vec<String> = (0..texts.len()).map(|i| format!("doc_{}", count + i)).collect();

        self.store.add(texts, &metadatas, &ids).await?;

        tracing::info!(count = texts.len(), "added documents to knowledge base");
        Ok(())
    }

    /// Query the knowledge base and generate an answer
    ///
    /// Retrieves up to `n_results` similar documents, assembles them into a
    /// labeled context block, and asks the generator for a spoken-style
    /// answer grounded in that context. With no retrieved documents the
    /// fixed [`FALLBACK_ANSWER`] is returned and the generator is not
    /// invoked.
    ///
    /// # Errors
    ///
    /// Store and generator failures propagate unchanged
    pub async fn query(&self, question: &str, n_results: usize) -> Result<QueryResult> {
        let retrieved = self.store.query(question, n_results).await?;

        if retrieved.is_empty() {
            tracing::debug!("no documents retrieved, returning fallback answer");
            return Ok(QueryResult {
                answer: FALLBACK_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let mut context = String::new();
        let mut sources = Vec::with_capacity(retrieved.len());

        for (i, doc) in retrieved.iter().enumerate() {
            if i > 0 {
                context.push_str("\n\n");
            }
            let _ = write!(context, "[Source {}]: {}", i + 1, doc.text);
            sources.push(doc.metadata.source.clone());
        }

        let user_message = format!(
            "Context:\n{context}\n\nQuestion: {question}\n\n\
             Provide a brief, conversational answer suitable for voice output."
        );

        let answer = self
            .generator
            .complete(SYSTEM_PROMPT, &user_message, MAX_ANSWER_TOKENS)
            .await?;

        Ok(QueryResult { answer, sources })
    }

    /// Number of documents in the knowledge base
    ///
    /// # Errors
    ///
    /// Store failures propagate unchanged
    pub async fn count(&self) -> Result<usize> {
        self.store.count().await
    }
}
