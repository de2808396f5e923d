//! OpenAI-compatible speech provider
//!
//! Implements `TextToSpeech` against `POST {base}/audio/speech`. Works with
//! OpenAI itself and with edge-tts bridges that accept neural voice names
//! such as `ur-PK-UzmaNeural`.
//!
//! # Supported output formats
//! - mp3, opus, aac, flac, wav, pcm

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SynthesisError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};

/// Longest input accepted by `/audio/speech`, in characters
pub const MAX_INPUT_CHARS: usize = 4096;

/// OpenAI-compatible text-to-speech provider
#[derive(Debug, Clone)]
pub struct OpenAISpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl OpenAISpeechProvider {
    /// Create a new speech provider
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SynthesisError> {
        config.validate().map_err(SynthesisError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SynthesisError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn tts_url(&self) -> String {
        format!("{}/audio/speech", self.config.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

/// TTS request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

fn map_error(
    status: reqwest::StatusCode,
    body: &str,
    voice: &str,
    model: &str,
) -> SynthesisError {
    if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
        return match api_error.error.code.as_deref() {
            Some("rate_limit_exceeded") => SynthesisError::RateLimited,
            Some("model_not_found") => SynthesisError::ModelNotAvailable(model.to_string()),
            Some("invalid_voice") => SynthesisError::VoiceNotFound(voice.to_string()),
            _ => SynthesisError::SynthesisFailed(api_error.error.message),
        };
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return SynthesisError::RateLimited;
    }

    SynthesisError::SynthesisFailed(format!("HTTP {status}: {body}"))
}

#[async_trait]
impl TextToSpeech for OpenAISpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
    ) -> Result<AudioData, SynthesisError> {
        self.synthesize_with_format(text, voice, self.config.output_format)
            .await
    }

    #[instrument(skip(self, text), fields(text_len = text.len(), format = ?format))]
    async fn synthesize_with_format(
        &self,
        text: &str,
        voice: Option<&str>,
        format: AudioFormat,
    ) -> Result<AudioData, SynthesisError> {
        if !self.config.enabled {
            return Err(SynthesisError::Disabled);
        }

        if text.trim().is_empty() {
            return Err(SynthesisError::InvalidText(
                "Text cannot be empty".to_string(),
            ));
        }

        let length = text.chars().count();
        if length > MAX_INPUT_CHARS {
            return Err(SynthesisError::TextTooLong {
                length,
                max: MAX_INPUT_CHARS,
            });
        }

        let voice = voice.unwrap_or_else(|| self.default_voice());
        debug!(voice, "Synthesizing speech");

        let request = TtsRequest {
            model: &self.config.tts_model,
            input: text,
            voice,
            response_format: format.response_format(),
            speed: if (self.config.speed - 1.0).abs() < f32::EPSILON {
                None
            } else {
                Some(self.config.speed)
            },
        };

        let response = self
            .authorize(self.client.post(self.tts_url()))
            .json(&request)
            .send()
            .await
            .map_err(|e| SynthesisError::from_reqwest(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, voice, "Speech synthesis request failed");
            return Err(map_error(status, &error_body, voice, &self.config.tts_model));
        }

        let served_format = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(AudioFormat::from_mime_type)
            .unwrap_or(format);

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        if audio_bytes.is_empty() {
            return Err(SynthesisError::InvalidResponse(
                "Service returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio_bytes.len(), "Speech synthesis complete");

        Ok(AudioData::new(audio_bytes.to_vec(), served_format))
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }

    fn default_voice(&self) -> &str {
        &self.config.voices.en
    }
}
