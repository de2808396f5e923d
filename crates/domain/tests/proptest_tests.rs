//! Property-based tests for conversation sanitizing and reply parsing
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{ChatMessage, Conversation, LanguageCode, MessageRole, parse_reply};
use proptest::prelude::*;

fn role_strategy() -> impl Strategy<Value = MessageRole> {
    prop_oneof![
        Just(MessageRole::System),
        Just(MessageRole::User),
        Just(MessageRole::Assistant),
    ]
}

fn conversation_strategy() -> impl Strategy<Value = Conversation> {
    prop::collection::vec((role_strategy(), "[a-z ]{0,12}"), 0..12).prop_map(|items| {
        Conversation::from_messages(
            items
                .into_iter()
                .map(|(role, content)| ChatMessage::new(role, content)),
        )
    })
}

fn language_strategy() -> impl Strategy<Value = LanguageCode> {
    prop_oneof![
        Just(LanguageCode::En),
        Just(LanguageCode::Ur),
        Just(LanguageCode::Hi),
    ]
}

fn shape(conv: &Conversation) -> Vec<(MessageRole, String)> {
    conv.messages
        .iter()
        .map(|m| (m.role, m.content.clone()))
        .collect()
}

// ============================================================================
// Conversation sanitizing
// ============================================================================

mod sanitize_tests {
    use super::*;

    proptest! {
        #[test]
        fn sanitizing_is_idempotent(conv in conversation_strategy()) {
            let once = conv.sanitized();
            let twice = once.sanitized();
            prop_assert_eq!(shape(&once), shape(&twice));
        }

        #[test]
        fn no_mergeable_neighbours_remain(conv in conversation_strategy()) {
            prop_assert!(!conv.sanitized().needs_sanitizing());
        }

        #[test]
        fn system_messages_are_preserved(conv in conversation_strategy()) {
            let before: Vec<_> = conv
                .messages
                .iter()
                .filter(|m| m.role == MessageRole::System)
                .map(|m| m.content.clone())
                .collect();
            let sanitized = conv.sanitized();
            let after: Vec<_> = sanitized
                .messages
                .iter()
                .filter(|m| m.role == MessageRole::System)
                .map(|m| m.content.clone())
                .collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn content_order_is_preserved(conv in conversation_strategy()) {
            let original: Vec<String> = conv.messages.iter().map(|m| m.content.clone()).collect();
            let joined_after: Vec<String> = conv
                .sanitized()
                .messages
                .iter()
                .flat_map(|m| m.content.split('\n').map(str::to_string).collect::<Vec<_>>())
                .collect();
            prop_assert_eq!(original, joined_after);
        }

        #[test]
        fn never_grows(conv in conversation_strategy()) {
            prop_assert!(conv.sanitized().message_count() <= conv.message_count());
        }
    }
}

// ============================================================================
// Language marker parsing
// ============================================================================

mod parse_tests {
    use super::*;

    proptest! {
        #[test]
        fn leading_marker_is_detected_and_removed(
            language in language_strategy(),
            body in "[a-zA-Z0-9 .,!?]{0,40}"
        ) {
            let parsed = parse_reply(&format!("{}{}", language.marker(), body));
            prop_assert_eq!(parsed.language, language);
            prop_assert_eq!(parsed.clean_text, body.trim().to_string());
        }

        #[test]
        fn repeated_marker_is_removed_everywhere(
            language in language_strategy(),
            left in "[a-z ]{0,20}",
            right in "[a-z ]{0,20}"
        ) {
            let raw = format!("{m}{left}{m}{right}{m}", m = language.marker());
            let parsed = parse_reply(&raw);
            prop_assert_eq!(parsed.language, language);
            prop_assert!(!parsed.clean_text.contains(language.marker()));
        }

        #[test]
        fn text_without_marker_is_english_and_trimmed(body in "[a-zA-Z0-9 \n.,]{0,60}") {
            let parsed = parse_reply(&body);
            prop_assert_eq!(parsed.language, LanguageCode::En);
            prop_assert_eq!(parsed.clean_text, body.trim().to_string());
        }

        #[test]
        fn parsing_is_deterministic(body in ".{0,60}") {
            prop_assert_eq!(parse_reply(&body), parse_reply(&body));
        }
    }
}
