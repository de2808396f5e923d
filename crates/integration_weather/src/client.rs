//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap current-weather and 5-day forecast APIs.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{
    CurrentResponse, CurrentWeather, Envelope, FORECAST_TIME_FORMAT, Forecast, ForecastEntry,
    ForecastResponse,
};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request exceeded the configured timeout
    #[error("Weather request timed out after {0}s")]
    Timeout(u64),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// City is empty
    #[error("City name cannot be empty")]
    InvalidCity,

    /// The service does not know the city
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// No API key configured
    #[error("Weather API key is not configured")]
    MissingApiKey,

    /// API key rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The service answered with an error code
    #[error("Error: {message} (code {code})")]
    Api {
        /// `cod` field of the response
        code: u16,
        /// `message` field of the response
        message: String,
    },

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap `appid`
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Unit system passed as `units` (default: metric)
    #[serde(default = "default_units")]
    pub units: String,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("units", &self.units)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout() -> u64 {
    15
}

fn default_units() -> String {
    "metric".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            units: default_units(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current weather for a city
    async fn get_current(&self, city: &str) -> Result<CurrentWeather, WeatherError>;

    /// Get the 5-day / 3-hour forecast for a city
    async fn get_forecast(&self, city: &str) -> Result<Forecast, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("base_url", &self.config.base_url)
            .field("units", &self.config.units)
            .field("has_api_key", &self.config.api_key.is_some())
            .finish()
    }
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, name: &str) -> String {
        format!(
            "{}/data/2.5/{name}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn validate_city(city: &str) -> Result<&str, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::InvalidCity);
        }
        Ok(city)
    }

    /// GET an endpoint and return the body once `cod` says it succeeded
    async fn fetch(&self, name: &str, city: &str) -> Result<String, WeatherError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey)?;

        let response = self
            .client
            .get(self.endpoint(name))
            .query(&[
                ("q", city),
                ("appid", api_key),
                ("units", self.config.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let Ok(envelope) = serde_json::from_str::<Envelope>(&body) else {
            warn!(status = %status, "Weather service returned a non-JSON body");
            if status.is_server_error() {
                return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
            }
            return Err(WeatherError::ParseError(format!(
                "HTTP {status}: response is not JSON"
            )));
        };

        let code = envelope.code().unwrap_or_else(|| status.as_u16());
        if code == 200 {
            return Ok(body);
        }

        let message = envelope.message_text();
        warn!(code, message = %message, "Weather service reported an error");
        Err(match code {
            404 => WeatherError::CityNotFound(city.to_string()),
            401 => WeatherError::Unauthorized(message),
            429 => WeatherError::RateLimitExceeded,
            500..=599 => WeatherError::ServiceUnavailable(message),
            _ => WeatherError::Api { code, message },
        })
    }

    fn map_transport(&self, err: &reqwest::Error) -> WeatherError {
        if err.is_timeout() {
            WeatherError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            WeatherError::ConnectionFailed(err.to_string())
        } else {
            WeatherError::RequestFailed(err.to_string())
        }
    }

    fn parse_current(body: &str, city: &str) -> Result<CurrentWeather, WeatherError> {
        let raw: CurrentResponse =
            serde_json::from_str(body).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let description = raw
            .weather
            .first()
            .map(|w| w.description.clone())
            .ok_or_else(|| WeatherError::ParseError("No weather condition in response".into()))?;

        Ok(CurrentWeather {
            city: if raw.name.is_empty() {
                city.to_string()
            } else {
                raw.name
            },
            description,
            temperature: raw.main.temp,
            humidity: raw.main.humidity.unwrap_or_default(),
            feels_like: raw.main.feels_like.unwrap_or(raw.main.temp),
        })
    }

    fn parse_forecast(body: &str, city: &str) -> Result<Forecast, WeatherError> {
        let raw: ForecastResponse =
            serde_json::from_str(body).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let entries = raw
            .list
            .into_iter()
            .map(|item| {
                let time = NaiveDateTime::parse_from_str(&item.dt_txt, FORECAST_TIME_FORMAT)
                    .map_err(|e| {
                        WeatherError::ParseError(format!("Invalid dt_txt '{}': {e}", item.dt_txt))
                    })?;
                Ok(ForecastEntry {
                    time,
                    temperature: item.main.temp,
                    rain_chance: item.pop.unwrap_or(0.0) * 100.0,
                    condition: item
                        .weather
                        .first()
                        .map(|w| w.main.clone())
                        .unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        Ok(Forecast {
            city: raw
                .city
                .map(|c| c.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| city.to_string()),
            entries,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn get_current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let city = Self::validate_city(city)?;
        debug!("Fetching current weather");

        let body = self.fetch("weather", city).await?;
        Self::parse_current(&body, city)
    }

    #[instrument(skip(self))]
    async fn get_forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let city = Self::validate_city(city)?;
        debug!("Fetching weather forecast");

        let body = self.fetch("forecast", city).await?;
        let forecast = Self::parse_forecast(&body, city)?;
        debug!(entries = forecast.entries.len(), "Forecast received");
        Ok(forecast)
    }
}
