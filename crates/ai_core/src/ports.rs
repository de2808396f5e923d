//! Port definitions for completion providers
//!
//! Defines the traits (ports) that provider adapters must implement.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use domain::{ChatMessage, Conversation, MessageRole};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Request for a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Messages in the conversation, oldest first
    pub messages: Vec<CompletionMessage>,
    /// Model to use (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// A message in the completion request (OpenAI-compatible format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

impl CompletionMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&ChatMessage> for CompletionMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self::new(msg.role, msg.content.clone())
    }
}

impl CompletionRequest {
    /// Build a request from every message of a conversation
    pub fn from_conversation(conversation: &Conversation) -> Self {
        Self::from_messages(conversation.messages.iter().map(CompletionMessage::from))
    }

    /// Build a request from arbitrary messages
    pub fn from_messages(messages: impl IntoIterator<Item = CompletionMessage>) -> Self {
        Self {
            messages: messages.into_iter().collect(),
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Create a simple single-turn request
    pub fn simple(user_message: impl Into<String>) -> Self {
        Self::from_messages([CompletionMessage::new(MessageRole::User, user_message)])
    }

    /// Create a request with system prompt
    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self::from_messages([
            CompletionMessage::new(MessageRole::System, system),
            CompletionMessage::new(MessageRole::User, user),
        ])
    }

    /// Set the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set temperature
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the generation limit
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Reject requests no provider can answer
    pub fn ensure_not_empty(&self) -> Result<(), ProviderError> {
        if self.messages.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "completion request has no messages".to_string(),
            ));
        }
        Ok(())
    }
}

/// Response from a completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// An image handed to a vision-capable model
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Inline `data:` URL carrying the base64-encoded image
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }
}

/// Port for chat completion providers
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Produce one reply for the given messages
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResponse, ProviderError>;

    /// Short provider name for logs
    fn provider_name(&self) -> &str;

    /// Model used when the request names none
    fn default_model(&self) -> &str;
}

/// Port for providers that can read images
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Ask a vision model about an image
    async fn describe_image(
        &self,
        image: &ImageInput,
        prompt: &str,
    ) -> Result<CompletionResponse, ProviderError>;
}
