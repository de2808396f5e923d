//! Language markers embedded in model replies
//!
//! The system prompt asks the model to prefix every reply with one of
//! `[LANG:EN]`, `[LANG:UR]` or `[LANG:HI]`. [`parse_reply`] reads the marker
//! back out, strips it, and classifies the reply so the speech layer can pick
//! a matching voice.
//!
//! Detection checks for presence, not position: a marker in the middle of the
//! text still counts, and every occurrence of the detected marker is removed.
//! Markers are checked in the order Urdu, Hindi, English; only the first one
//! found is stripped.

use serde::{Deserialize, Serialize};

use crate::value_objects::LanguageCode;

/// System-prompt fragment that makes the model emit a language marker
pub const LANGUAGE_TAG_INSTRUCTION: &str = "Detect the language the user writes in and reply \
in that same language. Begin every reply with exactly one language tag: [LANG:EN] for English, \
[LANG:UR] for Urdu, or [LANG:HI] for Hindi. Do not use the tag anywhere else.";

/// A model reply with its language marker removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReply {
    /// Reply text without the detected marker, trimmed
    pub clean_text: String,
    /// Language signalled by the marker (English when none was present)
    pub language: LanguageCode,
}

impl ParsedReply {
    /// Whether there is any text left to show or speak
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clean_text.is_empty()
    }
}

/// Detect and strip the language marker from a raw reply
///
/// Total and pure: absence of a marker is the English default, not an error.
#[must_use]
pub fn parse_reply(raw_text: &str) -> ParsedReply {
    LanguageCode::PRIORITY
        .into_iter()
        .find(|language| raw_text.contains(language.marker()))
        .map_or_else(
            || ParsedReply {
                clean_text: raw_text.trim().to_string(),
                language: LanguageCode::En,
            },
            |language| ParsedReply {
                clean_text: raw_text.replace(language.marker(), "").trim().to_string(),
                language,
            },
        )
}
