//! Outcome of resolving a reply across completion providers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which provider slot produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderUsed {
    /// The primary provider answered
    Primary,
    /// The primary failed and the secondary answered
    Secondary,
    /// Both failed; the text is the fixed apology
    None,
}

impl ProviderUsed {
    /// Lowercase slot name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::None => "none",
        }
    }

    /// Whether a provider actually produced the text
    #[must_use]
    pub const fn is_answered(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ProviderUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw reply text plus the provider slot it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResult {
    /// Reply text as returned by the provider (markers not yet stripped)
    pub text: String,
    /// Slot that produced the text
    pub provider_used: ProviderUsed,
    /// Model that produced the text, when a provider answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderResult {
    /// A reply from a provider
    pub fn answered(
        text: impl Into<String>,
        provider_used: ProviderUsed,
        model: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            provider_used,
            model: Some(model.into()),
        }
    }

    /// The terminal result when no provider answered
    pub fn unanswered(apology: impl Into<String>) -> Self {
        Self {
            text: apology.into(),
            provider_used: ProviderUsed::None,
            model: None,
        }
    }
}
