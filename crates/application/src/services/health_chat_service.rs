//! Health chat - follow-up questions about an uploaded report

use std::{fmt, sync::Arc};

use domain::{ChatMessage, Conversation, LANGUAGE_TAG_INSTRUCTION};
use tracing::{debug, instrument};

use super::reply_service::{AssistantReply, ReplyService};
use crate::ports::CompletionOptions;

const HEALTH_COACH_PROMPT: &str = "You are a helpful Health Coach.";

/// Leading characters of the report text embedded in the system prompt
pub const REPORT_CONTEXT_CHARS: usize = 2000;

/// Transcript messages sent along with the system prompt
pub const HISTORY_WINDOW: usize = 5;

/// Result of one chat turn
#[derive(Debug, Clone)]
pub struct HealthChatTurn {
    pub reply: AssistantReply,
    /// Input transcript plus the user message and, when a provider
    /// answered, the assistant reply
    pub transcript: Conversation,
}

/// Health coach conversation on top of the reply pipeline
pub struct HealthChatService {
    replies: Arc<ReplyService>,
    options: CompletionOptions,
}

impl fmt::Debug for HealthChatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthChatService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl HealthChatService {
    pub fn new(replies: Arc<ReplyService>) -> Self {
        Self {
            replies,
            options: CompletionOptions::default(),
        }
    }

    /// Use the given completion options for every turn
    #[must_use]
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// System prompt, optionally grounded in report text
    #[must_use]
    pub fn system_prompt(report_text: Option<&str>) -> String {
        let mut prompt = format!("{HEALTH_COACH_PROMPT} {LANGUAGE_TAG_INSTRUCTION}");
        if let Some(report) = report_text.map(str::trim).filter(|r| !r.is_empty()) {
            let excerpt: String = report.chars().take(REPORT_CONTEXT_CHARS).collect();
            prompt.push_str("\n\nContext from uploaded report: ");
            prompt.push_str(&excerpt);
        }
        prompt
    }

    /// Conversation sent to the providers: system prompt + recent transcript
    #[must_use]
    pub fn build_conversation(transcript: &Conversation, report_text: Option<&str>) -> Conversation {
        let recent = transcript
            .recent(HISTORY_WINDOW)
            .iter()
            .filter(|m| m.role != domain::MessageRole::System)
            .cloned();

        let mut conversation = Conversation::from_messages(
            std::iter::once(ChatMessage::system(Self::system_prompt(report_text))).chain(recent),
        );
        conversation.id = transcript.id;
        conversation
    }

    /// Append `user_message`, get a reply, and append it to the transcript
    ///
    /// The apology is shown but not recorded, so a retried question merges
    /// with the unanswered one during sanitisation.
    #[instrument(skip_all, fields(history = transcript.message_count()))]
    pub async fn chat(
        &self,
        transcript: &Conversation,
        user_message: &str,
        report_text: Option<&str>,
    ) -> HealthChatTurn {
        let mut transcript = transcript.clone();
        transcript.add_user_message(user_message);

        let conversation = Self::build_conversation(&transcript, report_text);
        let reply = self.replies.respond(&conversation, &self.options).await;

        if reply.is_answered() {
            transcript.add_message(reply.to_message());
        } else {
            debug!("No provider answered, transcript left without reply");
        }

        HealthChatTurn { reply, transcript }
    }
}
