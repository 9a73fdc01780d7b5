//! Error types for the sibyl assistant

use thiserror::Error;

/// Result type alias for sibyl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the sibyl assistant
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Answer generation error
    #[error("generation error: {0}")]
    Generation(String),

    /// Embedding error
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Batch insert received mismatched texts/metadatas lengths
    #[error("length mismatch: {texts} texts but {metadatas} metadatas")]
    LengthMismatch {
        /// Number of document texts in the batch
        texts: usize,
        /// Number of metadata records in the batch
        metadatas: usize,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// `SQLite` error
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
