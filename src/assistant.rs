//! Voice assistant pipeline: transcribe, query, synthesize

use std::path::{Path, PathBuf};

use crate::Result;
use crate::knowledge::{DEFAULT_RESULTS, KnowledgeBase};
use crate::voice::{SpeechToText, TextToSpeech};

/// Reply used when transcription produces no text
///
/// Collaborator failures still propagate as errors; this covers the
/// silence case only.
pub const EMPTY_TRANSCRIPT_REPLY: &str = "I couldn't hear anything. Please try again.";

/// One full voice interaction
#[derive(Debug, Clone)]
pub struct Exchange {
    /// What the user said (empty if nothing was heard)
    pub transcription: String,
    /// The spoken answer text
    pub answer: String,
    /// Path of the synthesized answer audio, when synthesis ran
    pub audio: Option<PathBuf>,
}

/// End-to-end voice question answering
///
/// Owns the three collaborators and threads a question through them:
/// speech in, knowledge base query, speech out. The coupling between the
/// stages is purely textual.
pub struct Assistant {
    stt: SpeechToText,
    knowledge: KnowledgeBase,
    tts: TextToSpeech,
}

impl Assistant {
    /// Create an assistant from its collaborators
    #[must_use]
    pub fn new(stt: SpeechToText, knowledge: KnowledgeBase, tts: TextToSpeech) -> Self {
        Self { stt, knowledge, tts }
    }

    /// The underlying knowledge base
    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Answer a spoken question from an audio file
    ///
    /// An empty transcription short-circuits with a fixed reply and no
    /// knowledge base query or synthesis.
    ///
    /// # Errors
    ///
    /// Returns error if transcription, retrieval, generation, or synthesis
    /// fails
    pub async fn ask(&self, audio_path: &Path) -> Result<Exchange> {
        let transcription = self.stt.transcribe(audio_path).await?;

        if transcription.trim().is_empty() {
            tracing::info!("empty transcription, skipping query");
            return Ok(Exchange {
                transcription: String::new(),
                answer: EMPTY_TRANSCRIPT_REPLY.to_string(),
                audio: None,
            });
        }

        let result = self.knowledge.query(&transcription, DEFAULT_RESULTS).await?;

        let audio = self.tts.speak_to_file(&result.answer, None).await?;

        Ok(Exchange {
            transcription,
            answer: result.answer,
            audio: Some(audio),
        })
    }

    /// Answer a typed question, skipping the speech stages
    ///
    /// # Errors
    ///
    /// Returns error if retrieval or generation fails
    pub async fn ask_text(&self, question: &str) -> Result<crate::knowledge::QueryResult> {
        self.knowledge.query(question, DEFAULT_RESULTS).await
    }
}
