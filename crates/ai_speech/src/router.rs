//! Language → voice routing

use domain::LanguageCode;

use crate::config::VoiceMapConfig;

/// Picks the synthesis voice for a reply language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceRouter {
    voices: VoiceMapConfig,
}

impl VoiceRouter {
    #[must_use]
    pub const fn new(voices: VoiceMapConfig) -> Self {
        Self { voices }
    }

    /// Voice id for a language
    #[must_use]
    pub fn voice_for(&self, language: LanguageCode) -> &str {
        match language {
            LanguageCode::En => &self.voices.en,
            LanguageCode::Ur => &self.voices.ur,
            LanguageCode::Hi => &self.voices.hi,
        }
    }

    /// Voice id for a raw language code, English for anything unrecognised
    #[must_use]
    pub fn voice_for_code(&self, code: &str) -> &str {
        self.voice_for(code.parse().unwrap_or_default())
    }

    /// Every (language, voice) pair in priority order
    pub fn entries(&self) -> impl Iterator<Item = (LanguageCode, &str)> {
        LanguageCode::PRIORITY
            .into_iter()
            .map(|lang| (lang, self.voice_for(lang)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_voices() {
        let router = VoiceRouter::default();
        assert_eq!(router.voice_for(LanguageCode::En), "en-US-AriaNeural");
        assert_eq!(router.voice_for(LanguageCode::Ur), "ur-PK-UzmaNeural");
        assert_eq!(router.voice_for(LanguageCode::Hi), "hi-IN-SwaraNeural");
    }

    #[test]
    fn configured_voices_are_used() {
        let router = VoiceRouter::new(VoiceMapConfig {
            en: "en-GB-SoniaNeural".to_string(),
            ..Default::default()
        });
        assert_eq!(router.voice_for(LanguageCode::En), "en-GB-SoniaNeural");
        assert_eq!(router.voice_for(LanguageCode::Ur), "ur-PK-UzmaNeural");
    }

    #[test]
    fn raw_codes_route_case_insensitively() {
        let router = VoiceRouter::default();
        assert_eq!(router.voice_for_code("UR"), "ur-PK-UzmaNeural");
        assert_eq!(router.voice_for_code("hi"), "hi-IN-SwaraNeural");
    }

    #[test]
    fn unknown_code_falls_back_to_english() {
        let router = VoiceRouter::default();
        assert_eq!(router.voice_for_code("FR"), "en-US-AriaNeural");
        assert_eq!(router.voice_for_code(""), "en-US-AriaNeural");
    }

    #[test]
    fn routing_is_deterministic() {
        let router = VoiceRouter::default();
        for lang in LanguageCode::PRIORITY {
            assert_eq!(router.voice_for(lang), router.voice_for(lang));
        }
    }

    #[test]
    fn entries_cover_every_language() {
        let router = VoiceRouter::default();
        let langs: Vec<_> = router.entries().map(|(lang, _)| lang).collect();
        assert_eq!(langs, LanguageCode::PRIORITY.to_vec());
    }
}
