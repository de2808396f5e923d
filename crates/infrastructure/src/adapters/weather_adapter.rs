//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::{ForecastSlot, WeatherPort, WeatherSnapshot};
use async_trait::async_trait;
use domain::DomainError;
use integration_weather::{
    CurrentWeather, ForecastEntry, OpenWeatherMapClient, WeatherClient, WeatherConfig,
    WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for OpenWeatherMap
#[derive(Debug)]
pub struct WeatherAdapter {
    client: OpenWeatherMapClient,
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::CityNotFound(city) => ApplicationError::NotFound(format!("city '{city}'")),
            WeatherError::InvalidCity => DomainError::validation("city is required").into(),
            WeatherError::MissingApiKey | WeatherError::Unauthorized(_) => {
                ApplicationError::Configuration(err.to_string())
            }
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::ConnectionFailed(_)
            | WeatherError::RequestFailed(_)
            | WeatherError::Timeout(_)
            | WeatherError::ParseError(_)
            | WeatherError::Api { .. }
            | WeatherError::ServiceUnavailable(_) => {
                ApplicationError::ExternalService(err.to_string())
            }
        }
    }

    fn map_current(current: CurrentWeather) -> WeatherSnapshot {
        WeatherSnapshot {
            city: current.city,
            description: current.description,
            temperature: current.temperature,
            humidity: current.humidity,
            feels_like: current.feels_like,
        }
    }

    fn map_entry(entry: ForecastEntry) -> ForecastSlot {
        ForecastSlot {
            time: entry.time,
            temperature: entry.temperature,
            rain_chance: entry.rain_chance,
            condition: entry.condition,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, ApplicationError> {
        let current = self
            .client
            .get_current(city)
            .await
            .map_err(Self::map_error)?;
        debug!(temperature = current.temperature, "Fetched current weather");
        Ok(Self::map_current(current))
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastSlot>, ApplicationError> {
        let forecast = self
            .client
            .get_forecast(city)
            .await
            .map_err(Self::map_error)?;
        debug!(slots = forecast.entries.len(), "Fetched forecast");
        Ok(forecast.entries.into_iter().map(Self::map_entry).collect())
    }
}
