//! Reply language detected from a model's language marker

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Languages the assistant answers in
///
/// The set is closed: every reply is classified as one of these, defaulting
/// to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LanguageCode {
    /// English
    #[default]
    En,
    /// Urdu
    Ur,
    /// Hindi
    Hi,
}

impl LanguageCode {
    /// All supported languages, in marker-detection priority order
    pub const PRIORITY: [Self; 3] = [Self::Ur, Self::Hi, Self::En];

    /// Two-letter uppercase code ("EN", "UR", "HI")
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Ur => "UR",
            Self::Hi => "HI",
        }
    }

    /// Literal marker the model prefixes its reply with
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::En => "[LANG:EN]",
            Self::Ur => "[LANG:UR]",
            Self::Hi => "[LANG:HI]",
        }
    }

    /// Human-readable language name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ur => "Urdu",
            Self::Hi => "Hindi",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN" => Ok(Self::En),
            "UR" => Ok(Self::Ur),
            "HI" => Ok(Self::Hi),
            _ => Err(DomainError::UnsupportedLanguage(s.to_string())),
        }
    }
}
