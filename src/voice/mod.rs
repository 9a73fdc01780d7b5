//! Voice processing module
//!
//! Thin wrappers over the external speech services: a local Whisper server
//! for transcription and ElevenLabs for synthesis. Audio moves as file
//! paths and byte buffers; capture and playback hardware is out of scope.

mod stt;
mod tts;
mod voices;

pub use stt::{SpeechToText, WhisperModel};
pub use tts::TextToSpeech;
pub use voices::{VOICES, voice_id};
