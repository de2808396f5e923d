//! Groq chat completions client
//!
//! Typed client for Groq's OpenAI-compatible API. Serves as the primary
//! completion provider and as the vision provider for report images.

mod client;
mod types;

pub use client::GroqClient;
