//! Port definitions for speech synthesis
//!
//! Defines the trait (port) that speech synthesis adapters must implement.

use async_trait::async_trait;

use crate::error::SynthesisError;
use crate::types::{AudioData, AudioFormat};

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations of this trait convert text to audio speech.
///
/// # Example
///
/// ```ignore
/// use ai_speech::{TextToSpeech, VoiceRouter};
/// use domain::parse_reply;
///
/// async fn speak(tts: &impl TextToSpeech, router: &VoiceRouter, raw: &str) {
///     let reply = parse_reply(raw);
///     let audio = tts
///         .synthesize(&reply.clean_text, Some(router.voice_for(reply.language)))
///         .await?;
/// }
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize text in the configured output format
    ///
    /// `voice` falls back to [`TextToSpeech::default_voice`] when `None`.
    async fn synthesize(&self, text: &str, voice: Option<&str>)
    -> Result<AudioData, SynthesisError>;

    /// Synthesize text in a specific output format
    async fn synthesize_with_format(
        &self,
        text: &str,
        voice: Option<&str>,
        format: AudioFormat,
    ) -> Result<AudioData, SynthesisError>;

    /// Get the name of the current TTS model
    fn model_name(&self) -> &str;

    /// Voice used when none is given
    fn default_voice(&self) -> &str;
}
