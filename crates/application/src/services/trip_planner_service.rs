//! Trip planner
//!
//! Combines live weather, a web search for places and the user's routine into
//! a single plan written by the completion providers.

use std::{fmt, sync::Arc};

use chrono::{Datelike, Utc};
use domain::{ChatMessage, Conversation, DomainError, ProviderUsed};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{
        CompletionOptions, CompletionPort, ForecastSlot, WeatherPort, WeatherSnapshot,
        WebSearchPort, render_hits,
    },
};

const PLANNER_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Trip planner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlannerConfig {
    /// Fast model used to write the search query
    #[serde(default = "default_query_model")]
    pub query_model: Option<String>,

    /// Model for the final plan; `None` uses the primary default
    #[serde(default)]
    pub plan_model: Option<String>,

    #[serde(default = "default_plan_temperature")]
    pub plan_temperature: f32,

    /// Number of web results embedded in the plan prompt
    #[serde(default = "default_search_results")]
    pub search_results: usize,
}

#[allow(clippy::unnecessary_wraps)]
fn default_query_model() -> Option<String> {
    Some("llama-3.1-8b-instant".to_string())
}

const fn default_plan_temperature() -> f32 {
    0.6
}

const fn default_search_results() -> usize {
    3
}

impl Default for TripPlannerConfig {
    fn default() -> Self {
        Self {
            query_model: default_query_model(),
            plan_model: None,
            plan_temperature: default_plan_temperature(),
            search_results: default_search_results(),
        }
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub city: String,
    /// Activity or mood, e.g. "Relaxing outdoor walk"
    pub needs: String,
    /// Free-text schedule, e.g. "I work Mon-Fri 9-5. I am free Sunday."
    pub routine: String,
}

impl TripRequest {
    pub fn new(
        city: impl Into<String>,
        needs: impl Into<String>,
        routine: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            needs: needs.into(),
            routine: routine.into(),
        }
    }

    /// # Errors
    ///
    /// Returns a validation error when the city is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.city.trim().is_empty() {
            return Err(DomainError::validation("city is required"));
        }
        Ok(())
    }

    /// Query used when the model cannot write one
    #[must_use]
    pub fn keyword_query(&self) -> String {
        let needs = self.needs.trim();
        let city = self.city.trim();
        if needs.is_empty() {
            format!("best places {city}")
        } else {
            format!("best {needs} {city}")
        }
    }
}

/// A finished plan plus the live data it was based on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub city: String,
    pub weather: WeatherSnapshot,
    /// Empty when the forecast could not be fetched
    pub forecast: Vec<ForecastSlot>,
    pub search_query: String,
    /// Search results as markdown, or the search error text
    pub places: String,
    pub plan: String,
    pub provider_used: ProviderUsed,
    pub model: Option<String>,
}

impl TripPlan {
    /// Highest rain chance across the forecast
    #[must_use]
    pub fn max_rain_chance(&self) -> Option<f64> {
        self.forecast.iter().map(|s| s.rain_chance).reduce(f64::max)
    }
}

/// Orchestrates weather, search and completion into a trip plan
pub struct TripPlannerService {
    completion: Arc<dyn CompletionPort>,
    weather: Arc<dyn WeatherPort>,
    search: Arc<dyn WebSearchPort>,
    config: TripPlannerConfig,
}

impl fmt::Debug for TripPlannerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripPlannerService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TripPlannerService {
    pub fn new(
        completion: Arc<dyn CompletionPort>,
        weather: Arc<dyn WeatherPort>,
        search: Arc<dyn WebSearchPort>,
    ) -> Self {
        Self::with_config(completion, weather, search, TripPlannerConfig::default())
    }

    pub fn with_config(
        completion: Arc<dyn CompletionPort>,
        weather: Arc<dyn WeatherPort>,
        search: Arc<dyn WebSearchPort>,
        config: TripPlannerConfig,
    ) -> Self {
        Self {
            completion,
            weather,
            search,
            config,
        }
    }

    /// Build a trip plan
    ///
    /// Only a failed current-weather lookup aborts. A missing forecast or a
    /// failed search degrades the prompt; a failed completion yields the
    /// apology as the plan text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is invalid or current weather is
    /// unavailable.
    #[instrument(skip(self, request), fields(city = %request.city))]
    pub async fn plan(&self, request: &TripRequest) -> Result<TripPlan, ApplicationError> {
        request.validate()?;
        let city = request.city.trim();

        let weather = self.weather.current_weather(city).await?;

        let forecast = match self.weather.forecast(city).await {
            Ok(forecast) => forecast,
            Err(e) => {
                warn!(error = %e, "Forecast unavailable, continuing without it");
                Vec::new()
            }
        };

        let search_query = self.search_query(request).await;

        let places = match self
            .search
            .search(&search_query, self.config.search_results)
            .await
        {
            Ok(hits) => render_hits(&hits),
            Err(e) => {
                warn!(error = %e, query = %search_query, "Web search failed");
                format!("Web search error: {e}")
            }
        };

        let prompt = plan_prompt(request, &weather, &forecast, &places);
        let conversation = Conversation::from_messages([
            ChatMessage::system(PLANNER_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ]);
        let options = CompletionOptions {
            model: self.config.plan_model.clone(),
            temperature: Some(self.config.plan_temperature),
        };
        let result = self.completion.resolve(&conversation, &options).await;

        info!(
            provider = %result.provider_used,
            forecast_slots = forecast.len(),
            "Trip plan generated"
        );

        Ok(TripPlan {
            city: weather.city.clone(),
            weather,
            forecast,
            search_query,
            places,
            plan: result.text.trim().to_string(),
            provider_used: result.provider_used,
            model: result.model,
        })
    }

    /// Ask the fast model for a keyword query, falling back to a template
    async fn search_query(&self, request: &TripRequest) -> String {
        let prompt = query_prompt(request, Utc::now().year());
        let conversation = Conversation::from_messages([ChatMessage::user(prompt)]);
        let options = CompletionOptions {
            model: self.config.query_model.clone(),
            temperature: None,
        };
        let result = self.completion.resolve(&conversation, &options).await;

        let query = if result.provider_used.is_answered() {
            clean_query(&result.text)
        } else {
            String::new()
        };

        if query.is_empty() {
            let fallback = request.keyword_query();
            debug!(query = %fallback, "Using keyword query");
            fallback
        } else {
            debug!(query = %query, "Model wrote search query");
            query
        }
    }
}

fn query_prompt(request: &TripRequest, year: i32) -> String {
    format!(
        "Context: User in '{city}' wants '{needs}'.\n\
         Task: Write a precise KEYWORD search query.\n\
         Rules: Use keywords only. Add 'best' and the year {year}.\n\
         Example: \"best family parks {city} {year}\"\n\
         Output: ONLY the query string. No quotes.",
        city = request.city.trim(),
        needs = request.needs.trim(),
    )
}

fn clean_query(text: &str) -> String {
    text.replace('"', "").trim().to_string()
}

fn plan_prompt(
    request: &TripRequest,
    weather: &WeatherSnapshot,
    forecast: &[ForecastSlot],
    places: &str,
) -> String {
    let outlook = forecast
        .iter()
        .map(|s| s.rain_chance)
        .reduce(f64::max)
        .map_or_else(
            || "unavailable".to_string(),
            |rain| format!("highest rain chance {rain:.0}% over {} slots", forecast.len()),
        );

    format!(
        "You are an expert Trip Planner.\n\
         **User Data:** Routine: {routine}, Prefs: {needs}, City: {city}\n\
         **Live Data:** Weather: {weather}, Forecast: {outlook}, Search Results:\n{places}\n\
         **Directives:**\n\
         1. Suggest the best time for the trip based on the routine.\n\
         2. Suggest places from the search results.\n\
         3. Health tips based on the weather ({temp}°C).",
        routine = request.routine.trim(),
        needs = request.needs.trim(),
        city = request.city.trim(),
        weather = weather.summary(),
        temp = weather.temperature,
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use domain::ProviderResult;

    use super::*;
    use crate::ports::{MockCompletionPort, MockWeatherPort, MockWebSearchPort, SearchHit};

    fn multan_weather() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Multan".to_string(),
            description: "clear sky".to_string(),
            temperature: 34.5,
            humidity: 38,
            feels_like: 36.1,
        }
    }

    fn slot(rain: f64) -> ForecastSlot {
        ForecastSlot {
            time: NaiveDateTime::parse_from_str("2025-06-01 12:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            temperature: 33.0,
            rain_chance: rain,
            condition: "Clouds".to_string(),
        }
    }

    /// User prompt of the final plan call; `None` for the query call
    fn plan_prompt_of(conversation: &Conversation) -> Option<&str> {
        conversation.messages.get(1).map(|m| m.content.as_str())
    }

    fn request() -> TripRequest {
        TripRequest::new("Multan", "Relaxing outdoor walk", "I am free Sunday.")
    }

    fn weather_ok() -> MockWeatherPort {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_weather()
            .returning(|_| Ok(multan_weather()));
        weather
            .expect_forecast()
            .returning(|_| Ok(vec![slot(10.0), slot(60.0)]));
        weather
    }

    #[test]
    fn keyword_query_fallbacks() {
        assert_eq!(request().keyword_query(), "best Relaxing outdoor walk Multan");
        assert_eq!(
            TripRequest::new(" Lahore ", " ", "").keyword_query(),
            "best places Lahore"
        );
    }

    #[test]
    fn clean_query_strips_quotes() {
        assert_eq!(
            clean_query("  \"best parks Multan 2025\"\n"),
            "best parks Multan 2025"
        );
    }

    #[test]
    fn query_prompt_mentions_year() {
        let prompt = query_prompt(&request(), 2031);
        assert!(prompt.contains("User in 'Multan' wants 'Relaxing outdoor walk'"));
        assert!(prompt.contains("the year 2031"));
    }

    #[tokio::test]
    async fn blank_city_is_rejected() {
        let service = TripPlannerService::new(
            Arc::new(MockCompletionPort::new()),
            Arc::new(MockWeatherPort::new()),
            Arc::new(MockWebSearchPort::new()),
        );
        let result = service.plan(&TripRequest::new("  ", "walk", "")).await;
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn plan_combines_weather_search_and_routine() {
        let mut completion = MockCompletionPort::new();
        completion
            .expect_resolve()
            .withf(|_, options| options.model.as_deref() == Some("llama-3.1-8b-instant"))
            .times(1)
            .returning(|_, _| {
                ProviderResult::answered(
                    "\"best walking parks Multan 2025\"",
                    ProviderUsed::Primary,
                    "llama-3.1-8b-instant",
                )
            });
        completion
            .expect_resolve()
            .withf(|conversation, options| {
                let Some(prompt) = plan_prompt_of(conversation) else {
                    return false;
                };
                options.model.is_none()
                    && options.temperature == Some(0.6)
                    && conversation.messages[0].content == "You are a helpful assistant."
                    && prompt.contains("Weather: clear sky, 34.5°C")
                    && prompt.contains("highest rain chance 60%")
                    && prompt.contains("- **Shah Rukn-e-Alam**: Tomb [Link](https://x.example)")
                    && prompt.contains("Routine: I am free Sunday.")
            })
            .times(1)
            .returning(|_, _| {
                ProviderResult::answered(
                    "  Visit on Sunday morning.  ",
                    ProviderUsed::Primary,
                    "llama-3.3-70b-versatile",
                )
            });

        let mut search = MockWebSearchPort::new();
        search
            .expect_search()
            .withf(|query, max| query == "best walking parks Multan 2025" && *max == 3)
            .times(1)
            .returning(|_, _| {
                Ok(vec![SearchHit::new(
                    "Shah Rukn-e-Alam",
                    "https://x.example",
                    "Tomb",
                )])
            });

        let service =
            TripPlannerService::new(Arc::new(completion), Arc::new(weather_ok()), Arc::new(search));
        let plan = service.plan(&request()).await.unwrap();

        assert_eq!(plan.city, "Multan");
        assert_eq!(plan.search_query, "best walking parks Multan 2025");
        assert_eq!(plan.plan, "Visit on Sunday morning.");
        assert_eq!(plan.provider_used, ProviderUsed::Primary);
        assert_eq!(plan.forecast.len(), 2);
        assert_eq!(plan.max_rain_chance(), Some(60.0));
    }

    #[tokio::test]
    async fn weather_failure_aborts() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_weather()
            .returning(|city| Err(ApplicationError::NotFound(format!("city {city}"))));
        weather.expect_forecast().never();

        let mut completion = MockCompletionPort::new();
        completion.expect_resolve().never();

        let service = TripPlannerService::new(
            Arc::new(completion),
            Arc::new(weather),
            Arc::new(MockWebSearchPort::new()),
        );
        let result = service.plan(&request()).await;

        assert!(matches!(result, Err(ApplicationError::NotFound(m)) if m == "city Multan"));
    }

    #[tokio::test]
    async fn degraded_inputs_still_produce_a_plan() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_weather()
            .returning(|_| Ok(multan_weather()));
        weather
            .expect_forecast()
            .returning(|_| Err(ApplicationError::ExternalService("timeout".to_string())));

        let mut completion = MockCompletionPort::new();
        // query writer fails, so the keyword template is used
        completion
            .expect_resolve()
            .withf(|_, options| options.model.as_deref() == Some("llama-3.1-8b-instant"))
            .returning(|_, _| ProviderResult::unanswered("Sorry."));
        completion
            .expect_resolve()
            .withf(|conversation, _| {
                plan_prompt_of(conversation).is_some_and(|prompt| {
                    prompt.contains("Forecast: unavailable")
                        && prompt.contains("Web search error: External service error: quota")
                })
            })
            .returning(|_, _| ProviderResult::answered("Plan", ProviderUsed::Secondary, "m"));

        let mut search = MockWebSearchPort::new();
        search
            .expect_search()
            .withf(|query, _| query == "best Relaxing outdoor walk Multan")
            .returning(|_, _| Err(ApplicationError::ExternalService("quota".to_string())));

        let service =
            TripPlannerService::new(Arc::new(completion), Arc::new(weather), Arc::new(search));
        let plan = service.plan(&request()).await.unwrap();

        assert!(plan.forecast.is_empty());
        assert_eq!(plan.search_query, "best Relaxing outdoor walk Multan");
        assert!(plan.places.starts_with("Web search error:"));
        assert_eq!(plan.plan, "Plan");
        assert_eq!(plan.provider_used, ProviderUsed::Secondary);
    }

    #[tokio::test]
    async fn empty_search_renders_placeholder() {
        let mut completion = MockCompletionPort::new();
        completion
            .expect_resolve()
            .withf(|_, options| options.model.is_some())
            .returning(|_, _| ProviderResult::answered("   ", ProviderUsed::Primary, "m"));
        completion
            .expect_resolve()
            .withf(|conversation, _| {
                plan_prompt_of(conversation).is_some_and(|p| p.contains("No results found."))
            })
            .returning(|_, _| ProviderResult::unanswered("Sorry."));

        let mut search = MockWebSearchPort::new();
        search.expect_search().returning(|_, _| Ok(Vec::new()));

        let service =
            TripPlannerService::new(Arc::new(completion), Arc::new(weather_ok()), Arc::new(search));
        let plan = service.plan(&request()).await.unwrap();

        assert_eq!(plan.search_query, "best Relaxing outdoor walk Multan");
        assert_eq!(plan.places, "No results found.");
        assert_eq!(plan.provider_used, ProviderUsed::None);
        assert_eq!(plan.plan, "Sorry.");
    }
}
