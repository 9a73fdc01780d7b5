//! Speech-to-text (STT) processing

use std::path::Path;
use std::str::FromStr;

use crate::{Error, Result};

/// Whisper model size
///
/// Larger models trade speed and memory for accuracy; `Base` is a good
/// balance for interactive use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhisperModel {
    /// Fastest, least accurate (~1GB VRAM)
    Tiny,
    /// Good balance (~1GB VRAM)
    #[default]
    Base,
    /// Better accuracy (~2GB VRAM)
    Small,
    /// High accuracy (~5GB VRAM)
    Medium,
    /// Best accuracy (~10GB VRAM)
    Large,
}

impl WhisperModel {
    /// Model name as sent to the Whisper server
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Base => "base",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl FromStr for WhisperModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tiny" => Ok(Self::Tiny),
            "base" => Ok(Self::Base),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(Error::Config(format!(
                "unknown Whisper model size: {other} (expected tiny, base, small, medium, or large)"
            ))),
        }
    }
}

/// Response from the Whisper server's transcription endpoint
#[derive(serde::Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Transcribes speech to text via a local Whisper server
pub struct SpeechToText {
    client: reqwest::Client,
    base_url: String,
    model: WhisperModel,
}

impl SpeechToText {
    /// Create a new STT instance
    ///
    /// # Errors
    ///
    /// Returns error if the server URL is empty
    pub fn new(base_url: String, model: WhisperModel) -> Result<Self> {
        if base_url.is_empty() {
            return Err(Error::Config(
                "Whisper server URL required for STT".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            model,
        })
    }

    /// Transcribe an audio file to text
    ///
    /// Accepts whatever formats the Whisper server decodes (wav, mp3,
    /// webm, ...). The transcript is returned with surrounding whitespace
    /// trimmed.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or transcription fails
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let audio = std::fs::read(audio_path)?;
        tracing::debug!(
            path = %audio_path.display(),
            audio_bytes = audio.len(),
            model = self.model.as_str(),
            "starting transcription"
        );

        let file_name = audio_path
            .file_name()
            .map_or_else(|| "audio.wav".to_string(), |n| n.to_string_lossy().into_owned());

        let form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(audio).file_name(file_name))
            .text("model", self.model.as_str());

        let url = format!("{}/v1/audio/transcriptions", self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "transcription request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Whisper server error");
            return Err(Error::Stt(format!("Whisper server error {status}: {body}")));
        }

        let result: TranscriptionResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse transcription response");
            e
        })?;

        let transcript = result.text.trim().to_string();
        tracing::info!(transcript = %transcript, "transcription complete");
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_size_parsing() {
        assert_eq!("tiny".parse::<WhisperModel>().unwrap(), WhisperModel::Tiny);
        assert_eq!("base".parse::<WhisperModel>().unwrap(), WhisperModel::Base);
        assert_eq!("large".parse::<WhisperModel>().unwrap(), WhisperModel::Large);
        assert!("huge".parse::<WhisperModel>().is_err());
    }

    #[test]
    fn test_model_name_roundtrip() {
        for model in [
            WhisperModel::Tiny,
            WhisperModel::Base,
            WhisperModel::Small,
            WhisperModel::Medium,
            WhisperModel::Large,
        ] {
            assert_eq!(model.as_str().parse::<WhisperModel>().unwrap(), model);
        }
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = SpeechToText::new(String::new(), WhisperModel::Base);
        assert!(result.is_err());
    }
}
