//! API credentials

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Credentials for every external service
///
/// Kept apart from the per-crate configs so that the secrets are only
/// exposed at the moment a client is built.
#[derive(Default, Deserialize)]
pub struct ApiKeys {
    /// Groq (primary completions and vision)
    #[serde(default)]
    pub groq: Option<SecretString>,

    /// OpenRouter (secondary completions)
    #[serde(default)]
    pub openrouter: Option<SecretString>,

    /// Speech service bearer token
    #[serde(default)]
    pub speech: Option<SecretString>,

    /// OpenWeatherMap `appid`
    #[serde(default)]
    pub openweather: Option<SecretString>,

    /// Tavily search
    #[serde(default)]
    pub tavily: Option<SecretString>,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("groq", &redacted(self.groq.as_ref()))
            .field("openrouter", &redacted(self.openrouter.as_ref()))
            .field("speech", &redacted(self.speech.as_ref()))
            .field("openweather", &redacted(self.openweather.as_ref()))
            .field("tavily", &redacted(self.tavily.as_ref()))
            .finish()
    }
}

fn redacted(key: Option<&SecretString>) -> Option<&'static str> {
    key.map(|_| "[REDACTED]")
}

/// One credential slot in [`ApiKeys`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySlot {
    Groq,
    OpenRouter,
    Speech,
    OpenWeather,
    Tavily,
}

impl KeySlot {
    pub const ALL: [Self; 5] = [
        Self::Groq,
        Self::OpenRouter,
        Self::Speech,
        Self::OpenWeather,
        Self::Tavily,
    ];

    /// Field name in the `[keys]` section
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenRouter => "openrouter",
            Self::Speech => "speech",
            Self::OpenWeather => "openweather",
            Self::Tavily => "tavily",
        }
    }

    /// Conventional variable read when the key is not otherwise configured
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Groq => "GROQ_API_KEY",
            Self::OpenRouter => "OPENROUTER_API_KEY",
            Self::Speech => "OPENAI_API_KEY",
            Self::OpenWeather => "OPENWEATHER_API_KEY",
            Self::Tavily => "TAVILY_API_KEY",
        }
    }
}

impl ApiKeys {
    /// Fill unset keys from `lookup`, keyed by the conventional variable names
    pub fn fill_missing(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for slot in KeySlot::ALL {
            let entry = self.slot_mut(slot);
            if entry.is_none() {
                *entry = lookup(slot.env_var())
                    .filter(|v| !v.trim().is_empty())
                    .map(SecretString::from);
            }
        }
    }

    fn slot(&self, slot: KeySlot) -> Option<&SecretString> {
        match slot {
            KeySlot::Groq => self.groq.as_ref(),
            KeySlot::OpenRouter => self.openrouter.as_ref(),
            KeySlot::Speech => self.speech.as_ref(),
            KeySlot::OpenWeather => self.openweather.as_ref(),
            KeySlot::Tavily => self.tavily.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: KeySlot) -> &mut Option<SecretString> {
        match slot {
            KeySlot::Groq => &mut self.groq,
            KeySlot::OpenRouter => &mut self.openrouter,
            KeySlot::Speech => &mut self.speech,
            KeySlot::OpenWeather => &mut self.openweather,
            KeySlot::Tavily => &mut self.tavily,
        }
    }

    /// Names of the keys that are not configured
    pub fn missing(&self) -> Vec<&'static str> {
        KeySlot::ALL
            .into_iter()
            .filter(|slot| self.slot(*slot).is_none())
            .map(KeySlot::name)
            .collect()
    }
}

/// Copy a secret into a client configuration
pub(crate) fn expose(key: Option<&SecretString>) -> Option<String> {
    key.map(|k| k.expose_secret().to_string())
}
