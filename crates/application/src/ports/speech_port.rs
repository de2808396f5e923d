//! Speech port - Interface for voice selection and text-to-speech

use async_trait::async_trait;
use domain::{AudioArtifact, LanguageCode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for speech synthesis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Voice id for a reply language
    fn voice_for(&self, language: LanguageCode) -> String;

    /// Synthesize `text` with the given voice
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioArtifact, ApplicationError>;

    /// Whether synthesis is switched on
    fn is_enabled(&self) -> bool;
}
