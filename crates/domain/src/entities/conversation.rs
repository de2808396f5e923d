//! Conversation entity - A sequence of chat messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChatMessage, MessageRole};
use crate::value_objects::ConversationId;

/// A conversation containing a sequence of messages
///
/// The caller owns the transcript. Operations that reshape it for a provider
/// (`sanitized`, `recent`) return new values and leave `self` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier
    pub id: ConversationId,
    /// Messages in the conversation (oldest first)
    pub messages: Vec<ChatMessage>,
    /// When the conversation started
    pub created_at: DateTime<Utc>,
    /// When the conversation was last updated
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a conversation that starts with a system message
    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        let mut conv = Self::new();
        conv.add_message(ChatMessage::system(system_prompt));
        conv
    }

    /// Create a conversation from existing messages
    pub fn from_messages(messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        let mut conv = Self::new();
        conv.messages = messages.into_iter().collect();
        conv
    }

    /// Add a message to the conversation
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    /// Add a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessage::user(content));
    }

    /// Add an assistant message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessage::assistant(content));
    }

    /// Get the last message in the conversation
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Get the last user message
    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
    }

    /// Get the number of messages
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Check if the conversation is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The last `count` messages, oldest first
    pub fn recent(&self, count: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }

    /// Merge adjacent messages that share a role
    ///
    /// Some providers reject back-to-back turns from the same role. Runs of
    /// user or assistant messages collapse into one message whose content is
    /// joined with `\n`; the first message of the run keeps its id and
    /// timestamp. System messages are never merged, not even with each other.
    ///
    /// The transform is idempotent.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut merged: Vec<ChatMessage> = Vec::with_capacity(self.messages.len());

        for message in &self.messages {
            match merged.last_mut() {
                Some(previous)
                    if previous.role == message.role && message.role != MessageRole::System =>
                {
                    previous.content.push('\n');
                    previous.content.push_str(&message.content);
                },
                _ => merged.push(message.clone()),
            }
        }

        Self {
            id: self.id,
            messages: merged,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Whether any two adjacent messages would be merged by [`Self::sanitized`]
    pub fn needs_sanitizing(&self) -> bool {
        self.messages
            .windows(2)
            .any(|pair| pair[0].role == pair[1].role && pair[0].role != MessageRole::System)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
