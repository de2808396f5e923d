//! Reply pipeline
//!
//! ```text
//! Conversation ─▶ CompletionPort::resolve ─▶ parse_reply ─▶ SpeechPort::voice_for
//!                                                                  │
//!                 AssistantReply ◀── SpeechPort::synthesize ◀──────┘
//! ```
//!
//! The text reply is always returned. Audio is best-effort: a synthesis
//! failure is recorded on the reply and logged, never propagated.

use std::{fmt, sync::Arc, time::Instant};

use domain::{
    AudioArtifact, ChatMessage, Conversation, LanguageCode, MessageMetadata, ParsedReply,
    ProviderUsed, parse_reply,
};
use tracing::{debug, instrument, warn};

use crate::ports::{CompletionOptions, CompletionPort, SpeechPort};

/// Output of the reply pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    /// Reply text with the language marker removed
    pub reply: ParsedReply,
    /// Provider slot that answered
    pub provider_used: ProviderUsed,
    /// Model that answered, if any
    pub model: Option<String>,
    /// Voice chosen for the reply language, when synthesis ran
    pub voice: Option<String>,
    /// Synthesized speech, when synthesis succeeded
    pub audio: Option<AudioArtifact>,
    /// Why synthesis failed, when it did
    pub synthesis_error: Option<String>,
    /// End-to-end latency in milliseconds
    pub latency_ms: u64,
}

impl AssistantReply {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.reply.clean_text
    }

    #[must_use]
    pub const fn language(&self) -> LanguageCode {
        self.reply.language
    }

    /// Whether a provider produced the text (not the apology)
    #[must_use]
    pub const fn is_answered(&self) -> bool {
        self.provider_used.is_answered()
    }

    /// Transcript entry for this reply
    #[must_use]
    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::assistant(self.text()).with_metadata(MessageMetadata {
            model: self.model.clone(),
            provider: Some(self.provider_used.to_string()),
            latency_ms: Some(self.latency_ms),
        })
    }
}

/// Resolve → parse → route → synthesize
pub struct ReplyService {
    completion: Arc<dyn CompletionPort>,
    speech: Option<Arc<dyn SpeechPort>>,
}

impl fmt::Debug for ReplyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyService")
            .field("speech", &self.speech.is_some())
            .finish_non_exhaustive()
    }
}

impl ReplyService {
    /// Create a text-only pipeline
    pub fn new(completion: Arc<dyn CompletionPort>) -> Self {
        Self {
            completion,
            speech: None,
        }
    }

    /// Create a pipeline that also synthesizes speech
    pub fn with_speech(completion: Arc<dyn CompletionPort>, speech: Arc<dyn SpeechPort>) -> Self {
        Self {
            completion,
            speech: Some(speech),
        }
    }

    fn speech_enabled(&self) -> Option<&Arc<dyn SpeechPort>> {
        self.speech.as_ref().filter(|s| s.is_enabled())
    }

    /// Run the full pipeline
    #[instrument(skip(self, conversation, options), fields(msg_count = conversation.message_count()))]
    pub async fn respond(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> AssistantReply {
        let start = Instant::now();
        let mut reply = self.resolve_and_parse(conversation, options).await;

        let speech = self
            .speech_enabled()
            .filter(|_| reply.is_answered() && !reply.reply.is_empty());

        if let Some(speech) = speech {
            let voice = speech.voice_for(reply.language());
            match speech.synthesize(reply.text(), &voice).await {
                Ok(audio) => {
                    debug!(voice = %voice, bytes = audio.len(), "Reply synthesized");
                    reply.audio = Some(audio);
                }
                Err(e) => {
                    warn!(voice = %voice, error = %e, "Speech synthesis failed, returning text only");
                    reply.synthesis_error = Some(e.to_string());
                }
            }
            reply.voice = Some(voice);
        }

        reply.latency_ms = elapsed_ms(start);
        reply
    }

    /// Run the pipeline without synthesis
    #[instrument(skip(self, conversation, options), fields(msg_count = conversation.message_count()))]
    pub async fn respond_text(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> AssistantReply {
        let start = Instant::now();
        let mut reply = self.resolve_and_parse(conversation, options).await;
        reply.latency_ms = elapsed_ms(start);
        reply
    }

    async fn resolve_and_parse(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> AssistantReply {
        let result = self.completion.resolve(conversation, options).await;
        let reply = parse_reply(&result.text);

        debug!(
            provider = %result.provider_used,
            language = %reply.language,
            chars = reply.clean_text.chars().count(),
            "Reply resolved"
        );

        AssistantReply {
            reply,
            provider_used: result.provider_used,
            model: result.model,
            voice: None,
            audio: None,
            synthesis_error: None,
            latency_ms: 0,
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use domain::ProviderResult;

    use super::*;
    use crate::{
        error::ApplicationError,
        ports::{MockCompletionPort, MockSpeechPort},
    };

    fn completion_returning(result: ProviderResult) -> MockCompletionPort {
        let mut mock = MockCompletionPort::new();
        mock.expect_resolve()
            .times(1)
            .returning(move |_, _| result.clone());
        mock
    }

    fn speech_with_voices() -> MockSpeechPort {
        let mut mock = MockSpeechPort::new();
        mock.expect_is_enabled().return_const(true);
        mock.expect_voice_for().returning(|language| {
            match language {
                LanguageCode::En => "en-US-AriaNeural",
                LanguageCode::Ur => "ur-PK-UzmaNeural",
                LanguageCode::Hi => "hi-IN-SwaraNeural",
            }
            .to_string()
        });
        mock
    }

    #[tokio::test]
    async fn urdu_reply_is_spoken_with_urdu_voice() {
        let completion = completion_returning(ProviderResult::answered(
            "[LANG:UR] آپ کیسے ہیں؟",
            ProviderUsed::Primary,
            "llama-3.3-70b-versatile",
        ));
        let mut speech = speech_with_voices();
        speech
            .expect_synthesize()
            .withf(|text, voice| text == "آپ کیسے ہیں؟" && voice == "ur-PK-UzmaNeural")
            .times(1)
            .returning(|_, _| Ok(AudioArtifact::new(vec![0xFF, 0xFB], "audio/mpeg")));

        let service = ReplyService::with_speech(Arc::new(completion), Arc::new(speech));
        let reply = service
            .respond(&Conversation::new(), &CompletionOptions::default())
            .await;

        assert_eq!(reply.text(), "آپ کیسے ہیں؟");
        assert_eq!(reply.language(), LanguageCode::Ur);
        assert_eq!(reply.provider_used, ProviderUsed::Primary);
        assert_eq!(reply.voice.as_deref(), Some("ur-PK-UzmaNeural"));
        assert_eq!(reply.audio.as_ref().map(AudioArtifact::len), Some(2));
        assert!(reply.synthesis_error.is_none());
    }

    #[tokio::test]
    async fn unmarked_reply_defaults_to_english_voice() {
        let completion = completion_returning(ProviderResult::answered(
            "  Drink more water.  ",
            ProviderUsed::Secondary,
            "meta-llama/llama-3.3-70b-instruct",
        ));
        let mut speech = speech_with_voices();
        speech
            .expect_synthesize()
            .withf(|text, voice| text == "Drink more water." && voice == "en-US-AriaNeural")
            .returning(|_, _| Ok(AudioArtifact::new(vec![1], "audio/mpeg")));

        let service = ReplyService::with_speech(Arc::new(completion), Arc::new(speech));
        let reply = service
            .respond(&Conversation::new(), &CompletionOptions::default())
            .await;

        assert_eq!(reply.language(), LanguageCode::En);
        assert_eq!(reply.provider_used, ProviderUsed::Secondary);
        assert!(reply.audio.is_some());
    }

    #[tokio::test]
    async fn synthesis_failure_keeps_text() {
        let completion = completion_returning(ProviderResult::answered(
            "[LANG:HI] नमस्ते",
            ProviderUsed::Primary,
            "m",
        ));
        let mut speech = speech_with_voices();
        speech
            .expect_synthesize()
            .returning(|_, _| Err(ApplicationError::Speech("service unreachable".to_string())));

        let service = ReplyService::with_speech(Arc::new(completion), Arc::new(speech));
        let reply = service
            .respond(&Conversation::new(), &CompletionOptions::default())
            .await;

        assert_eq!(reply.text(), "नमस्ते");
        assert_eq!(reply.language(), LanguageCode::Hi);
        assert!(reply.audio.is_none());
        assert_eq!(reply.voice.as_deref(), Some("hi-IN-SwaraNeural"));
        assert!(
            reply
                .synthesis_error
                .as_deref()
                .is_some_and(|e| e.contains("service unreachable"))
        );
    }

    #[tokio::test]
    async fn apology_is_not_synthesized() {
        let completion = completion_returning(ProviderResult::unanswered("Sorry, try again."));
        let mut speech = speech_with_voices();
        speech.expect_synthesize().never();

        let service = ReplyService::with_speech(Arc::new(completion), Arc::new(speech));
        let reply = service
            .respond(&Conversation::new(), &CompletionOptions::default())
            .await;

        assert_eq!(reply.text(), "Sorry, try again.");
        assert_eq!(reply.provider_used, ProviderUsed::None);
        assert!(!reply.is_answered());
        assert!(reply.voice.is_none());
    }

    #[tokio::test]
    async fn marker_only_reply_is_not_synthesized() {
        let completion =
            completion_returning(ProviderResult::answered("[LANG:EN]", ProviderUsed::Primary, "m"));
        let mut speech = speech_with_voices();
        speech.expect_synthesize().never();

        let service = ReplyService::with_speech(Arc::new(completion), Arc::new(speech));
        let reply = service
            .respond(&Conversation::new(), &CompletionOptions::default())
            .await;

        assert!(reply.reply.is_empty());
        assert!(reply.audio.is_none());
    }

    #[tokio::test]
    async fn disabled_speech_is_skipped() {
        let completion =
            completion_returning(ProviderResult::answered("[LANG:EN] Hi", ProviderUsed::Primary, "m"));
        let mut speech = MockSpeechPort::new();
        speech.expect_is_enabled().return_const(false);
        speech.expect_voice_for().never();
        speech.expect_synthesize().never();

        let service = ReplyService::with_speech(Arc::new(completion), Arc::new(speech));
        let reply = service
            .respond(&Conversation::new(), &CompletionOptions::default())
            .await;

        assert_eq!(reply.text(), "Hi");
        assert!(reply.voice.is_none());
    }

    #[tokio::test]
    async fn respond_text_forwards_options() {
        let mut completion = MockCompletionPort::new();
        completion
            .expect_resolve()
            .withf(|conversation, options| {
                conversation.message_count() == 1
                    && options.model.as_deref() == Some("llama-3.1-8b-instant")
            })
            .times(1)
            .returning(|_, _| {
                ProviderResult::answered("[LANG:EN] ok", ProviderUsed::Primary, "llama-3.1-8b-instant")
            });

        let service = ReplyService::new(Arc::new(completion));
        let mut conversation = Conversation::new();
        conversation.add_user_message("hello");

        let reply = service
            .respond_text(&conversation, &CompletionOptions::model("llama-3.1-8b-instant"))
            .await;

        assert_eq!(reply.text(), "ok");
        assert_eq!(reply.model.as_deref(), Some("llama-3.1-8b-instant"));
    }

    #[test]
    fn to_message_carries_metadata() {
        let reply = AssistantReply {
            reply: parse_reply("[LANG:EN] Hello"),
            provider_used: ProviderUsed::Secondary,
            model: Some("m".to_string()),
            voice: None,
            audio: None,
            synthesis_error: None,
            latency_ms: 42,
        };
        let message = reply.to_message();
        assert_eq!(message.content, "Hello");
        let metadata = message.metadata.unwrap();
        assert_eq!(metadata.provider.as_deref(), Some("secondary"));
        assert_eq!(metadata.latency_ms, Some(42));
    }
}
