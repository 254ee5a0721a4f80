use crate::config::{AppConfig, ProviderConfig};
use crate::providers::{LlmProvider, OllamaProvider, OpenAIProvider};
use log::{info, warn};
use std::error::Error;
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            "ollama" => Ok(Box::new(OllamaProvider::new(config, timeout)?)),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }

    /// Build the default provider, or `None` when no model is usable.
    ///
    /// An unconfigured `openai` provider is still created when
    /// `OPENAI_API_KEY` is set, so the credential alone enables the model.
    pub fn from_config(config: &AppConfig) -> Option<Box<dyn LlmProvider>> {
        Self::from_config_with_timeout(config, Duration::from_secs(config.timeout))
    }

    /// Like [`ProviderFactory::from_config`] with an explicit request timeout
    pub fn from_config_with_timeout(
        config: &AppConfig,
        timeout: Duration,
    ) -> Option<Box<dyn LlmProvider>> {
        let provider_name = config.default_provider.as_str();

        let provider_config = match config.default_provider_config() {
            Some(provider_config) => provider_config.clone(),
            None if provider_name == "openai" => ProviderConfig::default(),
            None => {
                warn!(
                    "Default provider '{}' not found in configuration; using templates only",
                    provider_name
                );
                return None;
            }
        };

        match Self::create(provider_name, &provider_config, timeout) {
            Ok(provider) => {
                info!(
                    "Using '{}' with model {}",
                    provider_name,
                    provider_config.model.as_deref().unwrap_or("(provider default)")
                );
                Some(provider)
            }
            Err(e) => {
                info!("Model unavailable ({}); using templates only", e);
                None
            }
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "ollama"]
    }
}
