//! Application configuration
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `config.toml` in the working directory, or an explicit file
//! 3. `LIFEPLANNER_*` environment variables, `__` between nested keys
//!    (e.g. `LIFEPLANNER_PRIMARY__DEFAULT_MODEL`, `LIFEPLANNER_KEYS__GROQ`)
//!
//! Keys still unset after that are taken from the conventional variables
//! (`GROQ_API_KEY`, `TAVILY_API_KEY`, ...).

mod keys;

use std::path::Path;

use ai_core::{FallbackConfig, ProviderConfig};
use ai_speech::SpeechConfig;
use application::services::TripPlannerConfig;
use integration_weather::WeatherConfig;
use integration_websearch::WebSearchConfig;
pub use keys::{ApiKeys, KeySlot};
use serde::Deserialize;

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LIFEPLANNER";

/// Main application configuration
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Primary completion provider (Groq)
    #[serde(default)]
    pub primary: ProviderConfig,

    /// Secondary completion provider (OpenRouter or any OpenAI-compatible API)
    #[serde(default = "ProviderConfig::openrouter")]
    pub secondary: ProviderConfig,

    /// Apology text and model id mapping
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Speech synthesis
    #[serde(default)]
    pub speech: SpeechConfig,

    /// OpenWeatherMap
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Tavily search
    #[serde(default)]
    pub websearch: WebSearchConfig,

    /// Trip planner models and result count
    #[serde(default)]
    pub trip: TripPlannerConfig,

    /// Log filter and format
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// API credentials
    #[serde(default)]
    pub keys: ApiKeys,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            primary: ProviderConfig::groq(),
            secondary: ProviderConfig::openrouter(),
            fallback: FallbackConfig::default(),
            speech: SpeechConfig::default(),
            weather: WeatherConfig::default(),
            websearch: WebSearchConfig::default(),
            trip: TripPlannerConfig::default(),
            telemetry: TelemetryConfig::default(),
            keys: ApiKeys::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// With `path = None`, `config.toml` in the working directory is used if
    /// present. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let secondary = ProviderConfig::openrouter();
        let file = path.map_or_else(
            || config::File::with_name("config").required(false),
            |p| config::File::from(p).required(true),
        );

        let builder = config::Config::builder()
            // A partial [secondary] section must not inherit the Groq defaults
            .set_default("secondary.base_url", secondary.base_url)?
            .set_default("secondary.default_model", secondary.default_model)?
            .set_default("secondary.vision_model", secondary.vision_model)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.keys.fill_missing(|var| std::env::var(var).ok());
        Ok(config)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let secondary = ProviderConfig::openrouter();
        config::Config::builder()
            .set_default("secondary.base_url", secondary.base_url)?
            .set_default("secondary.default_model", secondary.default_model)?
            .set_default("secondary.vision_model", secondary.vision_model)?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Primary provider settings with the Groq key applied
    #[must_use]
    pub fn primary_config(&self) -> ProviderConfig {
        with_key(&self.primary, keys::expose(self.keys.groq.as_ref()))
    }

    /// Secondary provider settings with the OpenRouter key applied
    #[must_use]
    pub fn secondary_config(&self) -> ProviderConfig {
        with_key(&self.secondary, keys::expose(self.keys.openrouter.as_ref()))
    }

    /// Speech settings with the speech key applied
    #[must_use]
    pub fn speech_config(&self) -> SpeechConfig {
        let mut config = self.speech.clone();
        if let Some(key) = keys::expose(self.keys.speech.as_ref()) {
            config.api_key = Some(key);
        }
        config
    }

    /// Weather settings with the OpenWeatherMap key applied
    #[must_use]
    pub fn weather_config(&self) -> WeatherConfig {
        let mut config = self.weather.clone();
        if let Some(key) = keys::expose(self.keys.openweather.as_ref()) {
            config.api_key = Some(key);
        }
        config
    }

    /// Search settings with the Tavily key applied
    #[must_use]
    pub fn websearch_config(&self) -> WebSearchConfig {
        let mut config = self.websearch.clone();
        if let Some(key) = keys::expose(self.keys.tavily.as_ref()) {
            config.api_key = Some(key);
        }
        config
    }

    /// Validate every section
    ///
    /// The primary provider key is required; everything else degrades the
    /// feature that needs it (see [`AppConfig::missing_optional_keys`]).
    pub fn validate(&self) -> Result<(), String> {
        self.primary
            .validate()
            .map_err(|e| format!("primary: {e}"))?;
        self.secondary
            .validate()
            .map_err(|e| format!("secondary: {e}"))?;
        self.speech.validate().map_err(|e| format!("speech: {e}"))?;
        self.websearch
            .validate()
            .map_err(|e| format!("websearch: {e}"))?;
        if self.weather.base_url.trim().is_empty() {
            return Err("weather: base_url cannot be empty".to_string());
        }
        if self.primary_config().api_key.is_none() {
            return Err(
                "primary: no API key (set LIFEPLANNER_KEYS__GROQ or GROQ_API_KEY)".to_string(),
            );
        }
        Ok(())
    }

    /// Optional services that have no key configured
    #[must_use]
    pub fn missing_optional_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.secondary_config().api_key.is_none() {
            missing.push("openrouter");
        }
        if self.weather_config().api_key.is_none() {
            missing.push("openweather");
        }
        if self.websearch_config().api_key.is_none() {
            missing.push("tavily");
        }
        missing
    }
}

fn with_key(config: &ProviderConfig, key: Option<String>) -> ProviderConfig {
    let mut config = config.clone();
    if key.is_some() {
        config.api_key = key;
    }
    config
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn defaults_use_groq_and_openrouter() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.primary.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.secondary.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(
            config.secondary.default_model,
            "meta-llama/llama-3.3-70b-instruct"
        );
        assert_eq!(config.weather.timeout_secs, 15);
        assert_eq!(config.websearch.max_results, 3);
        assert_eq!(config.trip.search_results, 3);
        assert_eq!(config.telemetry.log_filter, "warn");
    }

    #[test]
    fn default_matches_empty_file() {
        let config = AppConfig::default();
        assert_eq!(config.secondary.base_url, "https://openrouter.ai/api/v1");
        assert!(config.keys.groq.is_none());
    }

    #[test]
    fn partial_secondary_section_keeps_openrouter_defaults() {
        let config = AppConfig::from_toml_str(
            r"
            [secondary]
            timeout_ms = 5000
            ",
        )
        .unwrap();
        assert_eq!(config.secondary.timeout_ms, 5000);
        assert_eq!(config.secondary.base_url, "https://openrouter.ai/api/v1");
    }

    #[test]
    fn toml_sections_override_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [primary]
            default_model = "llama-3.1-8b-instant"

            [speech]
            enabled = false

            [speech.voices]
            ur = "ur-PK-AsadNeural"

            [fallback]
            apology_message = "Try again later."

            [telemetry]
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.primary.default_model, "llama-3.1-8b-instant");
        assert!(!config.speech.enabled);
        assert_eq!(config.speech.voices.ur, "ur-PK-AsadNeural");
        assert_eq!(config.speech.voices.en, "en-US-AriaNeural");
        assert_eq!(config.fallback.apology_message, "Try again later.");
        assert!(config.telemetry.json);
    }

    #[test]
    fn keys_section_is_applied_to_client_configs() {
        let config = AppConfig::from_toml_str(
            r#"
            [keys]
            groq = "gsk-test"
            tavily = "tvly-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.primary_config().api_key.as_deref(), Some("gsk-test"));
        assert_eq!(
            config.websearch_config().api_key.as_deref(),
            Some("tvly-test")
        );
        assert!(config.secondary_config().api_key.is_none());
        assert!(config.primary.api_key.is_none());
    }

    #[test]
    fn validate_requires_primary_key() {
        let mut config = AppConfig::from_toml_str("").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("GROQ_API_KEY"));

        config.keys.groq = Some(SecretString::from("gsk-test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_reports_section() {
        let mut config = AppConfig::from_toml_str("").unwrap();
        config.keys.groq = Some(SecretString::from("gsk-test"));
        config.websearch.max_results = 0;
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("websearch:"));
    }

    #[test]
    fn missing_optional_keys() {
        let mut config = AppConfig::from_toml_str("").unwrap();
        config.keys.openweather = Some(SecretString::from("owm"));
        assert_eq!(config.missing_optional_keys(), vec!["openrouter", "tavily"]);
    }

    #[test]
    fn debug_does_not_print_keys() {
        let mut config = AppConfig::from_toml_str("").unwrap();
        config.keys.groq = Some(SecretString::from("gsk-very-secret"));
        let debug = format!("{config:?}");
        assert!(!debug.contains("gsk-very-secret"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/lifeplanner.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifeplanner.toml");
        std::fs::write(
            &path,
            "[weather]\nunits = \"imperial\"\n\n[trip]\nsearch_results = 5\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.weather.units, "imperial");
        assert_eq!(config.trip.search_results, 5);
    }
}
