//! Service wiring

use std::sync::Arc;

use anyhow::Context;
use application::ports::{CompletionPort, SpeechPort};
use application::services::{
    HealthChatService, ReplyService, ReportAnalysisService, TripPlannerService,
};
use infrastructure::{
    AppConfig, FallbackCompletionAdapter, GroqVisionAdapter, PdfTextAdapter, SpeechAdapter,
    WeatherAdapter, WebSearchAdapter,
};
use tracing::{info, warn};

/// Loaded configuration plus the shared completion adapter
pub struct AppContext {
    config: AppConfig,
    completion: Arc<dyn CompletionPort>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Validate the configuration and build the completion chain
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

        for key in config.missing_optional_keys() {
            warn!(key, "API key not configured, dependent features will fail");
        }

        let completion = FallbackCompletionAdapter::from_configs(
            config.primary_config(),
            config.secondary_config(),
            config.fallback.clone(),
        )
        .context("failed to initialize completion providers")?;

        info!(
            primary = %config.primary.default_model,
            secondary = %config.secondary.default_model,
            "Completion chain ready"
        );

        Ok(Self {
            config,
            completion: Arc::new(completion),
        })
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn speech(&self) -> anyhow::Result<SpeechAdapter> {
        SpeechAdapter::new(self.config.speech_config()).context("failed to initialize speech")
    }

    pub fn weather(&self) -> anyhow::Result<WeatherAdapter> {
        WeatherAdapter::new(self.config.weather_config()).context("failed to initialize weather")
    }

    /// Reply pipeline, spoken unless `speak` is false
    pub fn replies(&self, speak: bool) -> anyhow::Result<Arc<ReplyService>> {
        let completion = Arc::clone(&self.completion);
        let service = if speak {
            let speech: Arc<dyn SpeechPort> = Arc::new(self.speech()?);
            ReplyService::with_speech(completion, speech)
        } else {
            ReplyService::new(completion)
        };
        Ok(Arc::new(service))
    }

    pub fn health_chat(&self, speak: bool) -> anyhow::Result<HealthChatService> {
        Ok(HealthChatService::new(self.replies(speak)?))
    }

    pub fn trip_planner(&self) -> anyhow::Result<TripPlannerService> {
        let search = WebSearchAdapter::new(self.config.websearch_config())
            .context("failed to initialize web search")?;
        Ok(TripPlannerService::with_config(
            Arc::clone(&self.completion),
            Arc::new(self.weather()?),
            Arc::new(search),
            self.config.trip.clone(),
        ))
    }

    pub fn report_analysis(&self) -> anyhow::Result<ReportAnalysisService> {
        let vision = GroqVisionAdapter::new(self.config.primary_config())
            .context("failed to initialize vision model")?;
        Ok(ReportAnalysisService::new(
            Arc::clone(&self.completion),
            Arc::new(vision),
            Arc::new(PdfTextAdapter::new()),
        ))
    }
}
