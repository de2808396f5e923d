//! Primary → secondary completion fallback
//!
//! ```text
//! Conversation
//!     │  sanitize (merge same-role neighbours)
//!     ▼
//! ┌────────────────────────────┐
//! │  Primary (Groq)            │── ok ──▶ ProviderResult { Primary }
//! └────────────────────────────┘
//!     │ any error
//!     ▼
//! ┌────────────────────────────┐
//! │  Secondary (OpenRouter)    │── ok ──▶ ProviderResult { Secondary }
//! └────────────────────────────┘
//!     │ any error
//!     ▼
//! apology ──▶ ProviderResult { None }
//! ```
//!
//! Each provider is tried at most once per call.

use std::sync::Arc;
use std::time::Instant;

use domain::{Conversation, ProviderResult, ProviderUsed};
use tracing::{debug, info, instrument, warn};

use crate::config::FallbackConfig;
use crate::error::{FallbackError, ProviderError};
use crate::ports::{CompletionProvider, CompletionRequest};

/// Per-call options for [`FallbackResolver`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveOptions {
    /// Primary model id; `None` uses each provider's default
    pub model: Option<String>,
    /// Sampling temperature; `None` uses each provider's default
    pub temperature: Option<f32>,
    /// Generation limit
    pub max_tokens: Option<u32>,
}

impl ResolveOptions {
    /// Options naming a primary model id
    pub fn model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }

    /// Set the sampling temperature
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the generation limit
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Ordered two-provider completion chain
pub struct FallbackResolver {
    primary: Arc<dyn CompletionProvider>,
    secondary: Arc<dyn CompletionProvider>,
    config: FallbackConfig,
}

impl std::fmt::Debug for FallbackResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackResolver")
            .field("primary", &self.primary.provider_name())
            .field("secondary", &self.secondary.provider_name())
            .field("config", &self.config)
            .finish()
    }
}

impl FallbackResolver {
    pub fn new(
        primary: Arc<dyn CompletionProvider>,
        secondary: Arc<dyn CompletionProvider>,
        config: FallbackConfig,
    ) -> Self {
        info!(
            primary = %primary.provider_name(),
            secondary = %secondary.provider_name(),
            mapped_models = config.model_map.len(),
            "Initialized completion fallback"
        );
        Self {
            primary,
            secondary,
            config,
        }
    }

    /// Reply shown when both providers fail
    pub fn apology(&self) -> &str {
        &self.config.apology_message
    }

    /// Secondary model id for a primary model id
    ///
    /// Returns `None` when no primary model was requested or the id is not
    /// mapped; the secondary then uses its own default.
    pub fn secondary_model_for(&self, primary_model: Option<&str>) -> Option<String> {
        primary_model.and_then(|m| self.config.model_map.get(m).cloned())
    }

    /// Resolve a reply, never failing
    ///
    /// When both providers fail, returns the configured apology with
    /// [`ProviderUsed::None`].
    pub async fn resolve(
        &self,
        conversation: &Conversation,
        options: &ResolveOptions,
    ) -> ProviderResult {
        match self.try_resolve(conversation, options).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "No completion provider answered, returning apology");
                ProviderResult::unanswered(self.config.apology_message.clone())
            }
        }
    }

    /// Resolve a reply, reporting both errors if every provider fails
    #[instrument(
        skip(self, conversation),
        fields(conversation = %conversation.id, messages = conversation.message_count())
    )]
    pub async fn try_resolve(
        &self,
        conversation: &Conversation,
        options: &ResolveOptions,
    ) -> Result<ProviderResult, FallbackError> {
        let sanitized = conversation.sanitized();
        if sanitized.message_count() != conversation.message_count() {
            debug!(
                before = conversation.message_count(),
                after = sanitized.message_count(),
                "Merged consecutive same-role messages"
            );
        }
        let base = CompletionRequest::from_conversation(&sanitized);

        let primary_error = match self
            .attempt(
                self.primary.as_ref(),
                request_for(&base, options.model.clone(), options),
            )
            .await
        {
            Ok((text, model)) => {
                return Ok(ProviderResult::answered(text, ProviderUsed::Primary, model));
            }
            Err(e) => {
                warn!(
                    provider = %self.primary.provider_name(),
                    error = %e,
                    "Primary provider failed, falling back"
                );
                e
            }
        };

        let secondary_model = self.secondary_model_for(options.model.as_deref());
        match self
            .attempt(
                self.secondary.as_ref(),
                request_for(&base, secondary_model, options),
            )
            .await
        {
            Ok((text, model)) => Ok(ProviderResult::answered(
                text,
                ProviderUsed::Secondary,
                model,
            )),
            Err(secondary_error) => {
                warn!(
                    provider = %self.secondary.provider_name(),
                    error = %secondary_error,
                    "Secondary provider failed"
                );
                Err(FallbackError::AllProvidersFailed {
                    primary: primary_error,
                    secondary: secondary_error,
                })
            }
        }
    }

    async fn attempt(
        &self,
        provider: &dyn CompletionProvider,
        request: CompletionRequest,
    ) -> Result<(String, String), ProviderError> {
        let start = Instant::now();
        let response = provider.complete(request).await?;
        debug!(
            provider = %provider.provider_name(),
            model = %response.model,
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Provider answered"
        );
        Ok((response.content, response.model))
    }
}

fn request_for(
    base: &CompletionRequest,
    model: Option<String>,
    options: &ResolveOptions,
) -> CompletionRequest {
    CompletionRequest {
        messages: base.messages.clone(),
        model,
        temperature: options.temperature,
        max_tokens: options.max_tokens,
    }
}
