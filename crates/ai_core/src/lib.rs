//! AI Core - Chat completion providers and fallback
//!
//! Provides the completion port, a typed Groq client (primary and vision),
//! a raw-JSON OpenAI-compatible client (secondary) and the resolver that
//! chains them.

pub mod config;
pub mod error;
pub mod fallback;
pub mod groq;
pub mod http_json;
pub mod ports;

pub use config::{DEFAULT_APOLOGY, FallbackConfig, ProviderConfig};
pub use error::{FallbackError, ProviderError};
pub use fallback::{FallbackResolver, ResolveOptions};
pub use groq::GroqClient;
pub use http_json::HttpJsonProvider;
pub use ports::{
    CompletionMessage, CompletionProvider, CompletionRequest, CompletionResponse, ImageInput,
    TokenUsage, VisionProvider,
};
