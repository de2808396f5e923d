//! Weather service port
//!
//! Defines the interface for weather data retrieval by city name.

use async_trait::async_trait;
use chrono::NaiveDateTime;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City as reported by the weather service
    pub city: String,
    /// Condition description, e.g. "clear sky"
    pub description: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Apparent/feels-like temperature in Celsius
    pub feels_like: f64,
}

impl WeatherSnapshot {
    /// e.g. "clear sky, 34.5°C"
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}, {}°C", self.description, self.temperature)
    }
}

/// One forecast slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    pub time: NaiveDateTime,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Precipitation probability in percent (0-100)
    pub rain_chance: f64,
    pub condition: String,
}

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get current weather for a city
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, ApplicationError>;

    /// Get the multi-day forecast for a city
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastSlot>, ApplicationError>;
}
