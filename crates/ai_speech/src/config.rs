//! Configuration for speech synthesis

use serde::{Deserialize, Serialize};

use crate::types::AudioFormat;

/// Configuration for the speech synthesis service
#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Whether replies are spoken at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Bearer credential (optional for local edge-tts bridges)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible speech API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Output audio format
    #[serde(default)]
    pub output_format: AudioFormat,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// TTS speaking speed (0.25 to 4.0)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Voice per reply language
    #[serde(default)]
    pub voices: VoiceMapConfig,
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("tts_model", &self.tts_model)
            .field("output_format", &self.output_format)
            .field("timeout_ms", &self.timeout_ms)
            .field("speed", &self.speed)
            .field("voices", &self.voices)
            .finish()
    }
}

/// Voice id for each supported reply language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceMapConfig {
    #[serde(default = "default_en_voice")]
    pub en: String,
    #[serde(default = "default_ur_voice")]
    pub ur: String,
    #[serde(default = "default_hi_voice")]
    pub hi: String,
}

const fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:5050/v1".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000
}

const fn default_speed() -> f32 {
    1.0
}

fn default_en_voice() -> String {
    "en-US-AriaNeural".to_string()
}

fn default_ur_voice() -> String {
    "ur-PK-UzmaNeural".to_string()
}

fn default_hi_voice() -> String {
    "hi-IN-SwaraNeural".to_string()
}

impl Default for VoiceMapConfig {
    fn default() -> Self {
        Self {
            en: default_en_voice(),
            ur: default_ur_voice(),
            hi: default_hi_voice(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: None,
            base_url: default_base_url(),
            tts_model: default_tts_model(),
            output_format: AudioFormat::default(),
            timeout_ms: default_timeout_ms(),
            speed: default_speed(),
            voices: VoiceMapConfig::default(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("Speech base_url cannot be empty".to_string());
        }

        if !(0.25..=4.0).contains(&self.speed) {
            return Err(format!(
                "Speed must be between 0.25 and 4.0, got {}",
                self.speed
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        for (lang, voice) in [
            ("en", &self.voices.en),
            ("ur", &self.voices.ur),
            ("hi", &self.voices.hi),
        ] {
            if voice.trim().is_empty() {
                return Err(format!("Voice for '{lang}' cannot be empty"));
            }
        }

        Ok(())
    }
}
