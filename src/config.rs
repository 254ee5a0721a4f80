use config::{Config, ConfigError, Environment, File};
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used for hook generation
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Request timeout in seconds for outbound model calls
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            server: ServerConfig::default(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for a specific model provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o-mini", "llama3"); each provider has
    /// its own default when unset
    #[serde(default)]
    pub model: Option<String>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Penalty for repeating topics already present in the output
    #[serde(default = "default_penalty")]
    pub presence_penalty: f64,
    /// Penalty for repeating tokens verbatim
    #[serde(default = "default_penalty")]
    pub frequency_penalty: f64,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: None,
            temperature: default_temperature(),
            presence_penalty: default_penalty(),
            frequency_penalty: default_penalty(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "0.0.0.0:3000"
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f64 {
    0.9
}

fn default_penalty() -> f64 {
    0.6
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_timeout() -> u64 {
    30
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with HOOKVIRAL__ prefix
    /// 2. hookviral.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: HOOKVIRAL__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Like [`AppConfig::load`], but logs a failure and returns defaults.
    ///
    /// A broken config file must not stop the service; it runs on templates.
    pub fn load_or_default() -> Self {
        load_config().unwrap_or_else(|e| {
            warn!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        })
    }

    /// Settings for the default provider, if it is configured
    pub fn default_provider_config(&self) -> Option<&ProviderConfig> {
        self.providers.get(&self.default_provider)
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("hookviral").required(false))
        // Use double underscore for nested: HOOKVIRAL__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("HOOKVIRAL")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
