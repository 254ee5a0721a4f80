use log::info;
use std::time::Duration;

use crate::config::{AppConfig, ProviderConfig};
use crate::model::{HookRequest, HookResponse, Style};
use crate::pipeline::HookGenerator;
use crate::providers::ProviderFactory;
use crate::HookError;

/// Model backend selectable from the builder
#[derive(Debug, Clone, Copy)]
pub enum ProviderKind {
    OpenAI,
    Ollama,
}

impl ProviderKind {
    /// Convert to provider name string used by the factory
    fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Ollama => "ollama",
        }
    }
}

/// Builder for configuring and running a single hook generation
#[derive(Debug, Default)]
pub struct HookViralBuilder {
    topic: Option<String>,
    niche: Option<String>,
    style: Option<String>,
    spice_level: Option<f64>,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    templates_only: bool,
}

impl HookViralBuilder {
    /// Set the topic the hooks should be about
    ///
    /// # Example
    /// ```
    /// use hookviral::HookViral;
    ///
    /// let builder = HookViral::builder().topic("meal prep");
    /// ```
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Set the niche key, e.g. "fitness". Unknown niches use the lifestyle profile.
    pub fn niche(mut self, niche: impl Into<String>) -> Self {
        self.niche = Some(niche.into());
        self
    }

    /// Set the style tag. Unknown styles are treated as "mixed".
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style.as_str().to_string());
        self
    }

    /// Set the spice level; values outside 1..=4 are clamped
    pub fn spice(mut self, level: u8) -> Self {
        self.spice_level = Some(level as f64);
        self
    }

    /// Choose the model backend
    ///
    /// # Example
    /// ```
    /// use hookviral::{HookViral, ProviderKind};
    ///
    /// let builder = HookViral::builder()
    ///     .topic("sourdough")
    ///     .provider(ProviderKind::Ollama)
    ///     .model("llama3");
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key instead of relying on config files or environment variables
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a custom or proxy endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for the model request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Skip the model entirely and use template hooks
    pub fn templates_only(mut self) -> Self {
        self.templates_only = true;
        self
    }

    /// Run the generation
    ///
    /// # Errors
    /// Returns `HookError::Validation` when the topic or niche is missing.
    /// Model failures are not errors; they produce template hooks.
    ///
    /// # Example
    /// ```no_run
    /// # use hookviral::HookViral;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let response = HookViral::builder()
    ///     .topic("morning routine")
    ///     .niche("fitness")
    ///     .spice(3)
    ///     .generate()
    ///     .await?;
    /// println!("{} hooks from {}", response.count, response.source);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(self) -> Result<HookResponse, HookError> {
        let request = HookRequest {
            topic: self.topic.clone(),
            niche: self.niche.clone(),
            style: self.style.clone(),
            spice_level: self.spice_level,
        };

        // Reject bad input before touching config or the network
        request.validate()?;

        let generator = self.build_generator();
        generator.generate_hooks(&request).await
    }

    /// The builder's timeout as given, else the configured seconds
    fn resolved_timeout(&self, config: &AppConfig) -> Duration {
        self.timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout))
    }

    fn build_generator(&self) -> HookGenerator {
        if self.templates_only {
            return HookGenerator::fallback_only();
        }

        let overridden = self.provider.is_some()
            || self.api_key.is_some()
            || self.model.is_some()
            || self.base_url.is_some();

        let config = AppConfig::load_or_default();
        let timeout = self.resolved_timeout(&config);

        if !overridden {
            return HookGenerator::new(ProviderFactory::from_config_with_timeout(&config, timeout));
        }

        let provider_name = self
            .provider
            .map(|p| p.as_str())
            .unwrap_or(config.default_provider.as_str())
            .to_string();

        let mut provider_config = config
            .providers
            .get(&provider_name)
            .cloned()
            .unwrap_or_else(ProviderConfig::default);
        if self.api_key.is_some() {
            provider_config.api_key = self.api_key.clone();
        }
        if let Some(model) = &self.model {
            provider_config.model = Some(model.clone());
        }
        if self.base_url.is_some() {
            provider_config.base_url = self.base_url.clone();
        }

        match ProviderFactory::create(&provider_name, &provider_config, timeout) {
            Ok(provider) => HookGenerator::new(Some(provider)),
            Err(e) => {
                info!("Model unavailable ({}); using templates only", e);
                HookGenerator::fallback_only()
            }
        }
    }
}

/// Main entry point for the builder API
pub struct HookViral;

impl HookViral {
    /// Creates a new builder for generating hooks
    ///
    /// # Example
    /// ```
    /// use hookviral::HookViral;
    ///
    /// let builder = HookViral::builder();
    /// ```
    pub fn builder() -> HookViralBuilder {
        HookViralBuilder::default()
    }
}
