use crate::config::ProviderConfig;
use crate::prompt::Prompt;
use crate::providers::{parse_chat_response, Completion, LlmProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f64,
    presence_penalty: f64,
    frequency_penalty: f64,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or("OPENAI_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            presence_penalty: config.presence_penalty,
            frequency_penalty: config.frequency_penalty,
            max_tokens: config.max_tokens,
        })
    }

    /// Create a new OpenAI provider with default sampling parameters
    pub fn with_api_key(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), model)
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        let defaults = ProviderConfig::default();
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: defaults.temperature,
            presence_penalty: defaults.presence_penalty,
            frequency_penalty: defaults.frequency_penalty,
            max_tokens: defaults.max_tokens,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &Prompt) -> Result<Completion, Box<dyn Error + Send + Sync>> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": prompt.system},
                    {"role": "user", "content": prompt.user}
                ],
                "response_format": {"type": "json_object"},
                "temperature": self.temperature,
                "presence_penalty": self.presence_penalty,
                "frequency_penalty": self.frequency_penalty,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis() as u64;
        let response_body: Value = response.json().await?;

        if !status.is_success() && response_body.get("error").is_none() {
            return Err(format!("OpenAI request failed with status: {}", status).into());
        }

        parse_chat_response(self.provider_name(), response_body, latency_ms)
    }
}
