//! Retrieval-augmented knowledge base
//!
//! - **store**: document store contract and the sqlite-vec-backed implementation
//! - **generate**: answer generation contract and the Claude implementation
//! - **base**: the orchestrator composing retrieval, context assembly, and generation

mod base;
mod generate;
mod store;

pub use base::{DEFAULT_RESULTS, FALLBACK_ANSWER, KnowledgeBase, QueryResult};
pub use generate::{AnswerGenerator, ClaudeGenerator, MAX_ANSWER_TOKENS};
pub use store::{DocumentMetadata, DocumentStore, Retrieved, VectorStore};
