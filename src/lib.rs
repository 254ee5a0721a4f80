//! Topic-specific hook generation for short-form video.
//!
//! A request is rendered into a prompt, sent to a chat-completion model and
//! the answer is filtered against word-count and generic-opener rules. When
//! no model is configured, or the call fails, template hooks are returned
//! instead so callers always get something to show.

pub mod builder;
pub mod config;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod model;
pub mod niches;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod server;

pub use builder::{HookViral, HookViralBuilder, ProviderKind};
pub use crate::config::{AppConfig, ProviderConfig};
pub use error::HookError;
pub use model::{
    GenerationRequest, HookRequest, HookResponse, HookSource, SpiceLevel, Style, ValidatedHook,
};
pub use pipeline::HookGenerator;
pub use providers::{LlmProvider, OllamaProvider, OpenAIProvider};

/// Generate hooks using configuration from `hookviral.toml` and the environment.
///
/// Falls back to template hooks when no provider credential is available.
pub async fn generate_hooks(request: &HookRequest) -> Result<HookResponse, HookError> {
    HookGenerator::from_config(&AppConfig::load_or_default())
        .generate_hooks(request)
        .await
}
