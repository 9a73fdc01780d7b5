//! Text-to-speech (TTS) processing

use std::path::{Path, PathBuf};

use super::voices::voice_id;
use crate::{Error, Result};

/// ElevenLabs model used for synthesis
const TTS_MODEL: &str = "eleven_multilingual_v2";

/// Output format requested from ElevenLabs
const OUTPUT_FORMAT: &str = "mp3_44100_128";

/// Synthesizes speech from text via ElevenLabs
pub struct TextToSpeech {
    client: reqwest::Client,
    api_key: String,
    voice: String,
}

impl TextToSpeech {
    /// Create a new TTS instance with the given voice name
    ///
    /// # Errors
    ///
    /// Returns error if API key is missing
    pub fn new(api_key: String, voice: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "ElevenLabs API key required for TTS".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            voice,
        })
    }

    /// Current voice name
    #[must_use]
    pub fn voice(&self) -> &str {
        &self.voice
    }

    /// Change the voice used for subsequent synthesis
    pub fn set_voice(&mut self, voice: impl Into<String>) {
        self.voice = voice.into();
    }

    /// Synthesize text to speech
    ///
    /// # Returns
    ///
    /// Audio bytes (MP3 format)
    ///
    /// # Errors
    ///
    /// Returns error if synthesis fails
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct SynthesisRequest<'a> {
            text: &'a str,
            model_id: &'a str,
        }

        let url = format!(
            "https://api.elevenlabs.io/v1/text-to-speech/{}?output_format={OUTPUT_FORMAT}",
            voice_id(&self.voice)
        );

        let request = SynthesisRequest {
            text,
            model_id: TTS_MODEL,
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!("ElevenLabs TTS error {status}: {body}")));
        }

        let audio = response.bytes().await?;
        tracing::debug!(bytes = audio.len(), voice = %self.voice, "speech synthesized");
        Ok(audio.to_vec())
    }

    /// Synthesize text and write the audio to a file
    ///
    /// Without an explicit path the audio lands at `response.mp3` in the
    /// system temp directory, overwriting any previous response.
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or the file write fails
    pub async fn speak_to_file(&self, text: &str, output: Option<&Path>) -> Result<PathBuf> {
        let path = output.map_or_else(
            || std::env::temp_dir().join("response.mp3"),
            Path::to_path_buf,
        );

        let audio = self.synthesize(text).await?;
        std::fs::write(&path, &audio)?;

        tracing::info!(path = %path.display(), "audio written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        let result = TextToSpeech::new(String::new(), "Rachel".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_set_voice_updates_state() {
        let mut tts = TextToSpeech::new("key".to_string(), "Rachel".to_string()).unwrap();
        assert_eq!(tts.voice(), "Rachel");

        tts.set_voice("Josh");
        assert_eq!(tts.voice(), "Josh");
    }
}
