//! AI Speech - Text-to-Speech for assistant replies
//!
//! Provides the synthesis port, the language → voice router and an
//! OpenAI-compatible HTTP implementation.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters)
//! - `router` maps a reply language to a voice id
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{OpenAISpeechProvider, SpeechConfig, TextToSpeech, VoiceRouter};
//! use domain::LanguageCode;
//!
//! let config = SpeechConfig::default();
//! let router = VoiceRouter::new(config.voices.clone());
//! let provider = OpenAISpeechProvider::new(config)?;
//!
//! let voice = router.voice_for(LanguageCode::Ur);
//! let audio = provider.synthesize("میں ٹھیک ہوں", Some(voice)).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod router;
pub mod types;

pub use config::{SpeechConfig, VoiceMapConfig};
pub use error::SynthesisError;
pub use ports::TextToSpeech;
pub use providers::openai::{MAX_INPUT_CHARS, OpenAISpeechProvider};
pub use router::VoiceRouter;
pub use types::{AudioData, AudioFormat};
