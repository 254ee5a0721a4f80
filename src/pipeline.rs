use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::fallback::generate_fallback;
use crate::filter::parse_and_filter;
use crate::model::{Generation, GenerationRequest, HookRequest, HookResponse, HookSource};
use crate::niches::{get_profile, is_known};
use crate::prompt::build_prompt;
use crate::providers::{LlmProvider, ProviderFactory};
use crate::HookError;

/// Runs one request through the model branch or the template branch.
///
/// Holds no mutable state; a single instance serves concurrent requests.
pub struct HookGenerator {
    provider: Option<Box<dyn LlmProvider>>,
}

impl HookGenerator {
    pub fn new(provider: Option<Box<dyn LlmProvider>>) -> Self {
        HookGenerator { provider }
    }

    /// A generator that never calls a model
    pub fn fallback_only() -> Self {
        HookGenerator { provider: None }
    }

    /// Build the provider described by `config`, if it has a credential
    pub fn from_config(config: &AppConfig) -> Self {
        HookGenerator::new(ProviderFactory::from_config(config))
    }

    /// Name of the configured provider, if any
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.provider_name())
    }

    /// Validate an inbound request and generate hooks for it
    pub async fn generate_hooks(&self, request: &HookRequest) -> Result<HookResponse, HookError> {
        let request = request.validate()?;
        let generation = self.generate(&request).await;
        Ok(generation.into_response(&request))
    }

    /// Generate hooks for an already validated request.
    ///
    /// Model failures never escape: they are logged and answered with
    /// template hooks instead.
    pub async fn generate(&self, request: &GenerationRequest) -> Generation {
        if !is_known(&request.niche) {
            debug!("Unknown niche '{}', using default profile", request.niche);
        }

        let generation = match self.generate_with_model(request).await {
            Ok(generation) => generation,
            Err(reason) => {
                let hooks = generate_fallback(
                    request,
                    get_profile(&request.niche),
                    &mut StdRng::from_entropy(),
                );
                Generation {
                    hooks,
                    source: HookSource::Fallback { reason },
                }
            }
        };

        match &generation.source {
            HookSource::Model { provider } => info!(
                "Generated {} hooks for '{}' with {}",
                generation.hooks.len(),
                request.topic,
                provider
            ),
            HookSource::Fallback { reason } => info!(
                "Generated {} template hooks for '{}' ({})",
                generation.hooks.len(),
                request.topic,
                reason
            ),
        }

        generation
    }

    async fn generate_with_model(&self, request: &GenerationRequest) -> Result<Generation, String> {
        let provider = self
            .provider
            .as_deref()
            .ok_or_else(|| "no model provider configured".to_string())?;

        let prompt = build_prompt(request, get_profile(&request.niche));

        let completion = provider.complete(&prompt).await.map_err(|e| {
            let error = HookError::Provider(e.to_string());
            warn!("{} failed: {}", provider.provider_name(), error);
            error.to_string()
        })?;

        debug!(
            "{} answered in {}ms (model {:?}, tokens {:?})",
            provider.provider_name(),
            completion.metadata.latency_ms,
            completion.metadata.model_version,
            completion.metadata.tokens_used
        );

        let hooks = parse_and_filter(&completion.content, request).map_err(|e| {
            warn!("{}", e);
            e.to_string()
        })?;

        Ok(Generation {
            hooks,
            source: HookSource::Model {
                provider: provider.provider_name().to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::passes_filter;
    use crate::model::{SpiceLevel, Style};
    use crate::prompt::Prompt;
    use crate::providers::{Completion, CompletionMetadata};
    use async_trait::async_trait;
    use std::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeProvider {
        answer: Result<String, String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LlmProvider for FakeProvider {
        fn provider_name(&self) -> &str {
            "fake"
        }

        async fn complete(
            &self,
            _prompt: &Prompt,
        ) -> Result<Completion, Box<dyn Error + Send + Sync>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.answer {
                Ok(content) => Ok(Completion {
                    content: content.clone(),
                    metadata: CompletionMetadata::default(),
                }),
                Err(e) => Err(e.clone().into()),
            }
        }
    }

    fn generator(answer: Result<&str, &str>) -> (HookGenerator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FakeProvider {
            answer: answer.map(String::from).map_err(String::from),
            calls: calls.clone(),
        };
        (HookGenerator::new(Some(Box::new(provider))), calls)
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            topic: "morning routine".to_string(),
            niche: "fitness".to_string(),
            style: Style::Mixed,
            spice_level: SpiceLevel::clamped(2.0),
        }
    }

    #[tokio::test]
    async fn test_model_branch() {
        let (generator, calls) = generator(Ok(
            r#"{"hooks": [{"text": "I was doing this wrong for years"}, {"text": "Your morning routine skips the hardest rep"}]}"#,
        ));

        let generation = generator.generate(&request()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            generation.source,
            HookSource::Model {
                provider: "fake".to_string()
            }
        );
        assert_eq!(generation.hooks.len(), 1);
        assert_eq!(generation.hooks[0].style, "mixed");
    }

    #[tokio::test]
    async fn test_model_may_return_zero_hooks() {
        let (generator, _) = generator(Ok(r#"{"hooks": []}"#));
        let generation = generator.generate(&request()).await;
        assert!(!generation.source.is_fallback());
        assert!(generation.hooks.is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let (generator, calls) = generator(Err("connection reset"));
        let generation = generator.generate(&request()).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(generation.source.is_fallback());
        assert_eq!(generation.hooks.len(), 10);
        assert!(generation.hooks.iter().all(|h| passes_filter(&h.text)));
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let (generator, _) = generator(Ok("Sure! Here are your hooks:"));
        let generation = generator.generate(&request()).await;
        match generation.source {
            HookSource::Fallback { reason } => assert!(reason.contains("Malformed")),
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_provider_falls_back() {
        let generator = HookGenerator::fallback_only();
        assert!(generator.provider_name().is_none());

        let generation = generator.generate(&request()).await;
        assert!(generation.source.is_fallback());
        assert_eq!(generation.hooks.len(), 10);
    }

    #[tokio::test]
    async fn test_validation_error_skips_everything() {
        let (generator, calls) = generator(Ok(r#"{"hooks": []}"#));
        let request = HookRequest {
            topic: Some(String::new()),
            niche: Some("fitness".to_string()),
            ..Default::default()
        };

        let result = generator.generate_hooks(&request).await;
        assert!(matches!(result, Err(HookError::Validation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
