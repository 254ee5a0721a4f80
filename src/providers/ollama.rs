use crate::config::ProviderConfig;
use crate::prompt::Prompt;
use crate::providers::{parse_chat_response, Completion, LlmProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3";

/// Local model served by Ollama; needs no credential
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OllamaProvider {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        let defaults = ProviderConfig::default();
        OllamaProvider {
            client: Client::new(),
            base_url,
            model,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, prompt: &Prompt) -> Result<Completion, Box<dyn Error + Send + Sync>> {
        let start = Instant::now();

        // Ollama uses OpenAI-compatible API
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": prompt.system},
                    {"role": "user", "content": prompt.user}
                ],
                "response_format": {"type": "json_object"},
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let response_body: Value = response.json().await?;

        parse_chat_response(self.provider_name(), response_body, latency_ms)
    }
}
