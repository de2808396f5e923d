//! Completion adapter - Implements CompletionPort using ai_core's fallback chain

use std::sync::Arc;

use ai_core::{
    FallbackConfig, FallbackResolver, GroqClient, HttpJsonProvider, ProviderConfig,
    ProviderError, ResolveOptions,
};
use application::error::ApplicationError;
use application::ports::{CompletionOptions, CompletionPort};
use async_trait::async_trait;
use domain::{Conversation, ProviderResult};
use tracing::instrument;

/// Groq first, then the OpenAI-compatible secondary, then the apology
#[derive(Debug)]
pub struct FallbackCompletionAdapter {
    resolver: FallbackResolver,
}

impl FallbackCompletionAdapter {
    /// Wrap an existing resolver
    pub const fn new(resolver: FallbackResolver) -> Self {
        Self { resolver }
    }

    /// Build both provider clients and the resolver
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if either provider
    /// configuration is invalid.
    pub fn from_configs(
        primary: ProviderConfig,
        secondary: ProviderConfig,
        fallback: FallbackConfig,
    ) -> Result<Self, ApplicationError> {
        let primary = GroqClient::new(primary).map_err(configuration_error)?;
        let secondary =
            HttpJsonProvider::named("openrouter", secondary).map_err(configuration_error)?;
        Ok(Self::new(FallbackResolver::new(
            Arc::new(primary),
            Arc::new(secondary),
            fallback,
        )))
    }

    /// Reply used when no provider answers
    pub fn apology(&self) -> &str {
        self.resolver.apology()
    }

    fn resolve_options(options: &CompletionOptions) -> ResolveOptions {
        ResolveOptions {
            model: options.model.clone(),
            temperature: options.temperature,
            max_tokens: None,
        }
    }
}

fn configuration_error(err: ProviderError) -> ApplicationError {
    ApplicationError::Configuration(err.to_string())
}

#[async_trait]
impl CompletionPort for FallbackCompletionAdapter {
    #[instrument(skip(self, conversation), fields(model = ?options.model))]
    async fn resolve(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> ProviderResult {
        self.resolver
            .resolve(conversation, &Self::resolve_options(options))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_forwarded() {
        let options = CompletionOptions::model("llama-3.1-8b-instant").with_temperature(0.6);
        let resolved = FallbackCompletionAdapter::resolve_options(&options);
        assert_eq!(resolved.model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(resolved.temperature, Some(0.6));
        assert_eq!(resolved.max_tokens, None);
    }

    #[test]
    fn invalid_primary_config_is_configuration_error() {
        let primary = ProviderConfig {
            base_url: String::new(),
            ..ProviderConfig::groq()
        };
        let result = FallbackCompletionAdapter::from_configs(
            primary,
            ProviderConfig::openrouter(),
            FallbackConfig::default(),
        );
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn apology_comes_from_config() {
        let adapter = FallbackCompletionAdapter::from_configs(
            ProviderConfig::groq(),
            ProviderConfig::openrouter(),
            FallbackConfig {
                apology_message: "Please retry.".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(adapter.apology(), "Please retry.");
    }
}
