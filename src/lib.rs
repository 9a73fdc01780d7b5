//! Sibyl - Voice question-answering assistant with retrieval-augmented generation
//!
//! This library provides the core functionality for the sibyl assistant:
//! - Retrieval-augmented knowledge base (vector search + answer generation)
//! - Speech-to-text and text-to-speech wrappers
//! - The end-to-end voice pipeline
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      CLI                             │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                  Assistant                           │
//! │     STT  │  Knowledge Base  │  TTS                  │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │             External services                        │
//! │   Whisper  │  sqlite-vec  │  Claude  │  ElevenLabs │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod assistant;
pub mod config;
pub mod db;
pub mod error;
pub mod knowledge;
pub mod voice;

pub use assistant::{Assistant, EMPTY_TRANSCRIPT_REPLY, Exchange};
pub use config::Config;
pub use db::{DbConn, DbPool};
pub use error::{Error, Result};
pub use knowledge::{
    AnswerGenerator, ClaudeGenerator, DEFAULT_RESULTS, DocumentMetadata, DocumentStore,
    FALLBACK_ANSWER, KnowledgeBase, QueryResult, Retrieved, VectorStore,
};
pub use voice::{SpeechToText, TextToSpeech, VOICES, WhisperModel, voice_id};
