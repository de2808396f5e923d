//! Completion port - Interface for obtaining a reply to a conversation

use async_trait::async_trait;
use domain::{Conversation, ProviderResult};
#[cfg(test)]
use mockall::automock;

/// Per-call overrides for a completion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    /// Model id for the primary provider; `None` uses its default
    pub model: Option<String>,
    /// Sampling temperature; `None` uses the provider's configured value
    pub temperature: Option<f32>,
}

impl CompletionOptions {
    /// Options that pin a model
    #[must_use]
    pub fn model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            temperature: None,
        }
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Port for conversation completion with provider fallback
///
/// Implementations never fail: when no provider answers, the result carries
/// the fixed apology text and `ProviderUsed::None`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Obtain a raw reply (language marker not yet stripped)
    async fn resolve(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> ProviderResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn CompletionPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn CompletionPort>();
    }

    #[test]
    fn options_builder() {
        let options = CompletionOptions::model("llama-3.1-8b-instant").with_temperature(0.6);
        assert_eq!(options.model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(options.temperature, Some(0.6));
        assert_eq!(CompletionOptions::default().model, None);
    }
}
