mod factory;
mod ollama;
mod open_ai;

pub use factory::ProviderFactory;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::error::Error;

use crate::prompt::Prompt;

/// Token usage statistics reported by the provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenUsage {
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
}

/// Metadata about a single completion call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionMetadata {
    pub model_version: Option<String>,
    pub tokens_used: TokenUsage,
    pub latency_ms: u64,
}

/// Raw model output plus call metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Message content; expected to be a JSON object
    pub content: String,
    pub metadata: CompletionMetadata,
}

/// Unified trait for all chat-completion backends
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "ollama")
    fn provider_name(&self) -> &str;

    /// Send the prompt and return the model's JSON answer as text
    async fn complete(&self, prompt: &Prompt) -> Result<Completion, Box<dyn Error + Send + Sync>>;
}

/// Pull the message content and metadata out of an OpenAI-style chat response
pub(crate) fn parse_chat_response(
    provider: &str,
    response_body: Value,
    latency_ms: u64,
) -> Result<Completion, Box<dyn Error + Send + Sync>> {
    debug!("{} response: {:?}", provider, response_body);

    if let Some(error) = response_body.get("error") {
        let error_message = error
            .as_str()
            .unwrap_or_else(|| error["message"].as_str().unwrap_or("Unknown error"));
        return Err(format!("{} API error: {}", provider, error_message).into());
    }

    let content = response_body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| format!("Failed to extract content from {} response", provider))?
        .to_string();

    let model_version = response_body["model"].as_str().map(|s| s.to_string());
    let input_tokens = response_body["usage"]["prompt_tokens"]
        .as_u64()
        .map(|v| v as u32);
    let output_tokens = response_body["usage"]["completion_tokens"]
        .as_u64()
        .map(|v| v as u32);

    Ok(Completion {
        content,
        metadata: CompletionMetadata {
            model_version,
            tokens_used: TokenUsage {
                input_tokens,
                output_tokens,
            },
            latency_ms,
        },
    })
}
