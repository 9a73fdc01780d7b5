use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sibyl::db::{self, DocumentRepo, HttpEmbedder};
use sibyl::{
    Assistant, ClaudeGenerator, Config, DocumentMetadata, KnowledgeBase, SpeechToText,
    TextToSpeech, VOICES, VectorStore, WhisperModel,
};

/// Sibyl - voice question answering over your own documents
#[derive(Parser)]
#[command(name = "sibyl", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a document to the knowledge base
    Add {
        /// Document text
        text: String,
        /// Source label (defaults to a positional placeholder)
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Ask a typed question
    Ask {
        /// The question
        question: String,
        /// How many supporting documents to retrieve
        #[arg(short = 'n', long, default_value = "3")]
        results: usize,
        /// Also speak the answer aloud (writes an mp3)
        #[arg(long)]
        speak: bool,
    },
    /// Ask a spoken question from an audio file
    Voice {
        /// Path to the recorded question (wav, mp3, webm, ...)
        audio: PathBuf,
    },
    /// Show the number of documents in the knowledge base
    Count,
    /// Seed the knowledge base with sample hotel information
    Seed,
    /// List available TTS voices
    Voices,
    /// Test TTS output
    Say {
        /// Text to speak
        #[arg(default_value = "Hello! I'm your voice assistant.")]
        text: String,
        /// Output file (defaults to the system temp directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,sibyl=info",
        1 => "info,sibyl=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Command::Add { text, source } => cmd_add(&config, &text, source).await,
        Command::Ask {
            question,
            results,
            speak,
        } => cmd_ask(&config, &question, results, speak).await,
        Command::Voice { audio } => cmd_voice(&config, &audio).await,
        Command::Count => cmd_count(&config).await,
        Command::Seed => cmd_seed(&config).await,
        Command::Voices => cmd_voices(),
        Command::Say { text, output } => cmd_say(&config, &text, output.as_deref()).await,
    }
}

/// Build the knowledge base from configuration
fn build_knowledge(config: &Config) -> anyhow::Result<KnowledgeBase> {
    let pool = db::init(config.db_path())?;
    let repo = DocumentRepo::new(pool, config.collection.clone());
    let embedder = HttpEmbedder::new(config.embed_url.clone())?;
    let store = VectorStore::new(repo, Box::new(embedder));

    let generator = ClaudeGenerator::new(
        config.api_keys.anthropic.clone().unwrap_or_default(),
        config.llm_model.clone(),
    )?;

    Ok(KnowledgeBase::new(Arc::new(store), Arc::new(generator)))
}

/// Build the text-to-speech service from configuration
fn build_tts(config: &Config) -> anyhow::Result<TextToSpeech> {
    Ok(TextToSpeech::new(
        config.api_keys.elevenlabs.clone().unwrap_or_default(),
        config.voice.clone(),
    )?)
}

/// Build the full voice pipeline from configuration
fn build_assistant(config: &Config) -> anyhow::Result<Assistant> {
    let model: WhisperModel = config.stt_model.parse()?;
    let stt = SpeechToText::new(config.stt_url.clone(), model)?;
    let knowledge = build_knowledge(config)?;
    let tts = build_tts(config)?;

    Ok(Assistant::new(stt, knowledge, tts))
}

/// Add a single document
async fn cmd_add(config: &Config, text: &str, source: Option<String>) -> anyhow::Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("document text is empty");
    }

    let kb = build_knowledge(config)?;
    let metadatas = source.map(|s| vec![DocumentMetadata::new(s)]);
    kb.add_documents(&[text.to_string()], metadatas).await?;

    println!("Added document. Knowledge base now has {} documents.", kb.count().await?);
    Ok(())
}

/// Answer a typed question
async fn cmd_ask(
    config: &Config,
    question: &str,
    results: usize,
    speak: bool,
) -> anyhow::Result<()> {
    let kb = build_knowledge(config)?;
    let result = kb.query(question, results).await?;

    println!("Answer: {}", result.answer);
    if !result.sources.is_empty() {
        println!("Sources: {}", result.sources.join(", "));
    }

    if speak {
        let tts = build_tts(config)?;
        let path = tts.speak_to_file(&result.answer, None).await?;
        println!("Audio: {}", path.display());
    }

    Ok(())
}

/// Run the full voice pipeline on an audio file
async fn cmd_voice(config: &Config, audio: &std::path::Path) -> anyhow::Result<()> {
    if !audio.exists() {
        anyhow::bail!("audio file not found: {}", audio.display());
    }

    let assistant = build_assistant(config)?;
    let exchange = assistant.ask(audio).await?;

    println!("Heard:  {}", exchange.transcription);
    println!("Answer: {}", exchange.answer);
    if let Some(path) = exchange.audio {
        println!("Audio:  {}", path.display());
    }

    Ok(())
}

/// Show the document count
async fn cmd_count(config: &Config) -> anyhow::Result<()> {
    let kb = build_knowledge(config)?;
    println!("{} documents", kb.count().await?);
    Ok(())
}

/// Seed the knowledge base with sample hotel information
async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let kb = build_knowledge(config)?;

    let texts = vec![
        "Our hotel check-in time is 3 PM and check-out time is 11 AM. Early check-in may be available upon request.".to_string(),
        "The swimming pool is located on the 5th floor and is open from 6 AM to 10 PM daily.".to_string(),
        "Room service is available 24 hours. You can order by pressing 0 on your room phone.".to_string(),
        "Free WiFi is available throughout the hotel. The password is provided at check-in.".to_string(),
        "The fitness center is on the 3rd floor, open 24 hours for hotel guests.".to_string(),
    ];
    let metadatas = vec![
        DocumentMetadata::new("check-in policy"),
        DocumentMetadata::new("pool info"),
        DocumentMetadata::new("room service"),
        DocumentMetadata::new("wifi info"),
        DocumentMetadata::new("fitness center"),
    ];

    kb.add_documents(&texts, Some(metadatas)).await?;
    println!("Seeded {} documents. Try: sibyl ask \"What time can I check in?\"", kb.count().await?);
    Ok(())
}

/// List the available voices
fn cmd_voices() -> anyhow::Result<()> {
    for (name, id) in VOICES {
        println!("{name:<12} {id}");
    }
    Ok(())
}

/// Synthesize a test phrase
async fn cmd_say(
    config: &Config,
    text: &str,
    output: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    println!("Synthesizing with voice \"{}\"...", config.voice);

    let tts = build_tts(config)?;
    let path = tts.speak_to_file(text, output).await?;

    println!("Audio written to {}", path.display());
    Ok(())
}
