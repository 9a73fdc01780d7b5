//! Configuration management for the sibyl assistant

use std::path::PathBuf;

use serde::Deserialize;

use crate::Result;

/// Default Claude model for answer generation
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default ElevenLabs voice name
pub const DEFAULT_VOICE: &str = "Rachel";

/// Default document collection name
pub const DEFAULT_COLLECTION: &str = "voice_assistant";

/// Default local Whisper server URL
pub const DEFAULT_STT_URL: &str = "http://127.0.0.1:8090";

/// Default local sentence-embedding server URL
pub const DEFAULT_EMBED_URL: &str = "http://127.0.0.1:8091/embed";

/// Sibyl assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to data directory (database, audio output)
    pub data_dir: PathBuf,

    /// Document collection name
    pub collection: String,

    /// API keys
    pub api_keys: ApiKeys,

    /// Local Whisper server URL
    pub stt_url: String,

    /// Whisper model size (tiny, base, small, medium, large)
    pub stt_model: String,

    /// Local sentence-embedding server URL
    pub embed_url: String,

    /// TTS voice name
    pub voice: String,

    /// LLM model identifier for answer generation
    pub llm_model: String,
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `Anthropic` API key (answer generation)
    pub anthropic: Option<String>,

    /// `ElevenLabs` API key (speech synthesis)
    pub elevenlabs: Option<String>,
}

/// On-disk configuration file shape (all fields optional)
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    collection: Option<String>,
    stt_url: Option<String>,
    stt_model: Option<String>,
    embed_url: Option<String>,
    voice: Option<String>,
    llm_model: Option<String>,
}

/// Return the XDG data directory for sibyl, creating it if needed
///
/// Uses `~/.local/share/sibyl/` on Linux
pub fn data_dir() -> PathBuf {
    let dir = directories::ProjectDirs::from("dev", "sibyl", "sibyl")
        .map_or_else(|| PathBuf::from("./data"), |d| d.data_dir().to_path_buf());

    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(
            path = %dir.display(),
            error = %e,
            "failed to create data directory"
        );
    }

    dir
}

/// Return the path of the config file, if a config directory is known
fn config_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "sibyl", "sibyl")
        .map(|d| d.config_dir().join("config.toml"))
}

impl Config {
    /// Load configuration
    ///
    /// Values come from the config file (`~/.config/sibyl/config.toml` on
    /// Linux) when present, with environment variables taking precedence.
    /// API keys are environment-only.
    ///
    /// # Errors
    ///
    /// Returns error if the config file exists but cannot be parsed
    pub fn load() -> Result<Self> {
        let file = match config_file() {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                toml::from_str(&raw)?
            }
            _ => FileConfig::default(),
        };

        let api_keys = ApiKeys {
            anthropic: std::env::var("ANTHROPIC_API_KEY").ok(),
            elevenlabs: std::env::var("ELEVENLABS_API_KEY").ok(),
        };

        Ok(Self {
            data_dir: std::env::var("SIBYL_DATA_DIR")
                .ok()
                .map(PathBuf::from)
                .or(file.data_dir)
                .unwrap_or_else(data_dir),
            collection: env_or(file.collection, "SIBYL_COLLECTION", DEFAULT_COLLECTION),
            api_keys,
            stt_url: env_or(file.stt_url, "SIBYL_STT_URL", DEFAULT_STT_URL),
            stt_model: env_or(file.stt_model, "SIBYL_STT_MODEL", "base"),
            embed_url: env_or(file.embed_url, "SIBYL_EMBED_URL", DEFAULT_EMBED_URL),
            voice: env_or(file.voice, "SIBYL_VOICE", DEFAULT_VOICE),
            llm_model: env_or(file.llm_model, "SIBYL_MODEL", DEFAULT_MODEL),
        })
    }

    /// Path of the `SQLite` database file
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("sibyl.db")
    }
}

/// Resolve a setting: environment variable, then config file, then default
fn env_or(file_value: Option<String>, env_key: &str, default: &str) -> String {
    std::env::var(env_key)
        .ok()
        .or(file_value)
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_prefers_file_over_default() {
        let value = env_or(
            Some("custom".to_string()),
            "SIBYL_TEST_UNSET_VAR",
            "default",
        );
        assert_eq!(value, "custom");
    }

    #[test]
    fn test_env_or_falls_back_to_default() {
        let value = env_or(None, "SIBYL_TEST_UNSET_VAR", "default");
        assert_eq!(value, "default");
    }

    #[test]
    fn test_file_config_parses_partial_toml() {
        let parsed: FileConfig = toml::from_str("voice = \"Josh\"\nstt_model = \"small\"").unwrap();
        assert_eq!(parsed.voice.as_deref(), Some("Josh"));
        assert_eq!(parsed.stt_model.as_deref(), Some("small"));
        assert!(parsed.collection.is_none());
    }
}
