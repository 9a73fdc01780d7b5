//! Answer generation contract and Claude implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Output-length ceiling for generated answers (tokens)
pub const MAX_ANSWER_TOKENS: u32 = 500;

/// Language-model completion service for grounded answers
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate a completion for a system instruction and user message
    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String>;
}

/// Answer generator backed by the Anthropic messages API
pub struct ClaudeGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl ClaudeGenerator {
    /// Create a new generator
    ///
    /// # Errors
    ///
    /// Returns error if API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "Anthropic API key required for answer generation".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl AnswerGenerator for ClaudeGenerator {
    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String> {
        tracing::debug!(model = %self.model, max_tokens, "starting answer generation");

        let request = MessagesRequest {
            model: &self.model,
            max_tokens,
            system,
            messages: vec![ChatMessage {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "generation request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Anthropic API error");
            return Err(Error::Generation(format!(
                "Anthropic API error {status}: {body}"
            )));
        }

        let result: MessagesResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse generation response");
            e
        })?;

        let answer = result
            .content
            .first()
            .map(|block| block.text.clone())
            .unwrap_or_default();

        tracing::info!(chars = answer.len(), "answer generated");
        Ok(answer)
    }
}
