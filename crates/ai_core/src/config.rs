//! Configuration for completion providers and the fallback chain

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Connection settings for one completion provider
///
/// Field defaults describe the Groq endpoint; [`ProviderConfig::openrouter`]
/// gives the secondary preset.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer credential
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used when the request names none
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Model used for image transcription
    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("vision_model", &self.vision_model)
            .field("timeout_ms", &self.timeout_ms)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_vision_model() -> String {
    "llama-3.2-90b-vision-preview".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_temperature() -> f32 {
    0.7
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::groq()
    }
}

impl ProviderConfig {
    /// Groq chat completions (primary)
    pub fn groq() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            default_model: default_model(),
            vision_model: default_vision_model(),
            timeout_ms: default_timeout_ms(),
            temperature: default_temperature(),
            max_tokens: None,
        }
    }

    /// OpenRouter chat completions (secondary)
    pub fn openrouter() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            default_model: "meta-llama/llama-3.3-70b-instruct".to_string(),
            vision_model: "meta-llama/llama-3.2-90b-vision-instruct".to_string(),
            ..Self::groq()
        }
    }

    /// Chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url cannot be empty".to_string());
        }
        if self.default_model.trim().is_empty() {
            return Err("default_model cannot be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Behaviour of the primary → secondary fallback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Reply shown when both providers fail
    #[serde(default = "default_apology")]
    pub apology_message: String,

    /// Primary model id → secondary model id
    ///
    /// Providers name the same model differently. Unmapped ids fall back to
    /// the secondary's default model.
    #[serde(default = "default_model_map")]
    pub model_map: BTreeMap<String, String>,
}

/// Fixed reply used when no provider answers
pub const DEFAULT_APOLOGY: &str =
    "I'm sorry, I couldn't get a response from the assistant right now. Please try again in a moment.";

fn default_apology() -> String {
    DEFAULT_APOLOGY.to_string()
}

fn default_model_map() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "llama-3.3-70b-versatile".to_string(),
            "meta-llama/llama-3.3-70b-instruct".to_string(),
        ),
        (
            "llama-3.1-8b-instant".to_string(),
            "meta-llama/llama-3.1-8b-instruct".to_string(),
        ),
    ])
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            apology_message: default_apology(),
            model_map: default_model_map(),
        }
    }
}
