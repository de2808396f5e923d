//! Speech adapter - Implements SpeechPort using ai_speech

use ai_speech::{OpenAISpeechProvider, SpeechConfig, SynthesisError, TextToSpeech, VoiceRouter};
use application::error::ApplicationError;
use application::ports::SpeechPort;
use async_trait::async_trait;
use domain::{AudioArtifact, LanguageCode};
use tracing::{debug, instrument};

/// Voice routing plus OpenAI-compatible synthesis
pub struct SpeechAdapter {
    provider: OpenAISpeechProvider,
    router: VoiceRouter,
    enabled: bool,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("model", &self.provider.model_name())
            .field("router", &self.router)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl SpeechAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the speech configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let router = VoiceRouter::new(config.voices.clone());
        let enabled = config.enabled;
        let provider = OpenAISpeechProvider::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self {
            provider,
            router,
            enabled,
        })
    }

    /// Configured voice per language
    pub fn voices(&self) -> impl Iterator<Item = (LanguageCode, &str)> {
        self.router.entries()
    }

    /// Map synthesis error to application error
    fn map_error(err: SynthesisError) -> ApplicationError {
        match err {
            SynthesisError::RateLimited => ApplicationError::RateLimited,
            SynthesisError::Configuration(e) => ApplicationError::Configuration(e),
            SynthesisError::Disabled => ApplicationError::Configuration(err.to_string()),
            SynthesisError::ConnectionFailed(_) | SynthesisError::Timeout(_) => {
                ApplicationError::ExternalService(err.to_string())
            }
            SynthesisError::RequestFailed(_)
            | SynthesisError::InvalidText(_)
            | SynthesisError::TextTooLong { .. }
            | SynthesisError::SynthesisFailed(_)
            | SynthesisError::InvalidResponse(_)
            | SynthesisError::VoiceNotFound(_)
            | SynthesisError::ModelNotAvailable(_) => ApplicationError::Speech(err.to_string()),
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    fn voice_for(&self, language: LanguageCode) -> String {
        self.router.voice_for(language).to_string()
    }

    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioArtifact, ApplicationError> {
        let audio = self
            .provider
            .synthesize(text, Some(voice))
            .await
            .map_err(Self::map_error)?;
        debug!(bytes = audio.size_bytes(), "Speech synthesized");
        Ok(audio.into())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
