//! Types for speech synthesis
//!
//! Audio payloads and the output formats the synthesis endpoint can produce.

use domain::AudioArtifact;
use serde::{Deserialize, Serialize};

/// Output formats accepted as `response_format` by `/audio/speech`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 (default, plays everywhere)
    #[default]
    Mp3,
    /// Opus in an Ogg container
    Opus,
    /// AAC
    Aac,
    /// FLAC (lossless)
    Flac,
    /// WAV (uncompressed)
    Wav,
    /// Raw 16-bit PCM
    Pcm,
}

impl AudioFormat {
    /// Value for the `response_format` request field
    #[must_use]
    pub const fn response_format(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/ogg",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Pcm => "audio/pcm",
        }
    }

    /// Get the file extension for this audio format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "ogg",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    /// Parse audio format from a `Content-Type` header value
    #[must_use]
    pub fn from_mime_type(content_type: &str) -> Option<Self> {
        let parsed: mime::Mime = content_type.trim().parse().ok()?;
        if parsed.type_() != mime::AUDIO {
            return None;
        }
        match parsed.subtype().as_str() {
            "mpeg" | "mp3" => Some(Self::Mp3),
            "ogg" | "opus" => Some(Self::Opus),
            "aac" => Some(Self::Aac),
            "flac" | "x-flac" => Some(Self::Flac),
            "wav" | "x-wav" | "wave" => Some(Self::Wav),
            "pcm" | "l16" => Some(Self::Pcm),
            _ => None,
        }
    }
}

/// Synthesized audio with its format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

impl From<AudioData> for AudioArtifact {
    fn from(audio: AudioData) -> Self {
        let content_type = audio.mime_type();
        Self::new(audio.into_data(), content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_mp3() {
        assert_eq!(AudioFormat::default(), AudioFormat::Mp3);
        assert_eq!(AudioFormat::default().response_format(), "mp3");
    }

    #[test]
    fn response_formats_match_api_names() {
        assert_eq!(AudioFormat::Opus.response_format(), "opus");
        assert_eq!(AudioFormat::Aac.response_format(), "aac");
        assert_eq!(AudioFormat::Pcm.response_format(), "pcm");
    }

    #[test]
    fn from_mime_type_handles_parameters() {
        assert_eq!(
            AudioFormat::from_mime_type("audio/mpeg"),
            Some(AudioFormat::Mp3)
        );
        assert_eq!(
            AudioFormat::from_mime_type("audio/ogg; codecs=opus"),
            Some(AudioFormat::Opus)
        );
        assert_eq!(
            AudioFormat::from_mime_type("audio/x-wav"),
            Some(AudioFormat::Wav)
        );
    }

    #[test]
    fn from_mime_type_rejects_non_audio() {
        assert_eq!(AudioFormat::from_mime_type("application/json"), None);
        assert_eq!(AudioFormat::from_mime_type("not a mime"), None);
        assert_eq!(AudioFormat::from_mime_type("audio/midi"), None);
    }

    #[test]
    fn format_serializes_lowercase() {
        let json = serde_json::to_string(&AudioFormat::Flac).unwrap();
        assert_eq!(json, "\"flac\"");
        let parsed: AudioFormat = serde_json::from_str("\"wav\"").unwrap();
        assert_eq!(parsed, AudioFormat::Wav);
    }

    #[test]
    fn audio_data_accessors() {
        let audio = AudioData::new(vec![1, 2, 3], AudioFormat::Mp3);
        assert_eq!(audio.size_bytes(), 3);
        assert!(!audio.is_empty());
        assert_eq!(audio.mime_type(), "audio/mpeg");
        assert_eq!(audio.data(), &[1, 2, 3]);
    }

    #[test]
    fn converts_into_artifact() {
        let artifact: AudioArtifact = AudioData::new(vec![9; 4], AudioFormat::Opus).into();
        assert_eq!(artifact.content_type(), "audio/ogg");
        assert_eq!(artifact.len(), 4);
    }
}
