//! Synthesized speech handed back to the caller for playback

use serde::{Deserialize, Serialize};

/// Encoded audio plus its content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioArtifact {
    data: Vec<u8>,
    content_type: String,
}

impl AudioArtifact {
    /// Wrap encoded audio bytes
    pub fn new(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
        }
    }

    /// Encoded bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the encoded bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// MIME type, e.g. `audio/mpeg`
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there is no audio
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File extension matching the content type
    #[must_use]
    pub fn extension(&self) -> &'static str {
        let base = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        match base {
            "audio/ogg" => "ogg",
            "audio/opus" => "opus",
            "audio/wav" | "audio/x-wav" => "wav",
            "audio/flac" => "flac",
            "audio/aac" | "audio/m4a" => "m4a",
            _ => "mp3",
        }
    }
}
