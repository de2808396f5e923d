//! Weather data models
//!
//! Public weather types plus the OpenWeatherMap wire format they are parsed from.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of `dt_txt` in forecast entries
pub(crate) const FORECAST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// City name as reported by the service
    pub city: String,
    /// Free-text condition, e.g. "scattered clouds"
    pub description: String,
    /// Temperature in °C
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Perceived temperature in °C
    pub feels_like: f64,
}

impl CurrentWeather {
    /// One-line summary used in prompts, e.g. "clear sky, 31.5°C"
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}, {}°C", self.description, self.temperature)
    }
}

impl fmt::Display for CurrentWeather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}, {}°C (feels like {}°C), humidity {}%",
            self.city, self.description, self.temperature, self.feels_like, self.humidity
        )
    }
}

/// One 3-hour forecast slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Slot start (UTC)
    pub time: NaiveDateTime,
    /// Temperature in °C
    pub temperature: f64,
    /// Probability of precipitation in percent (0-100)
    pub rain_chance: f64,
    /// Short condition group, e.g. "Rain"
    pub condition: String,
}

impl ForecastEntry {
    /// Slot start in the service's own text format
    #[must_use]
    pub fn time_text(&self) -> String {
        self.time.format(FORECAST_TIME_FORMAT).to_string()
    }
}

/// 5-day / 3-hour forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest rain chance across all slots
    #[must_use]
    pub fn max_rain_chance(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|e| e.rain_chance)
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

// =============================================================================
// Wire format
// =============================================================================

/// `cod` is a number on `/weather` and a string on `/forecast` and errors
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ResponseCode {
    Number(u16),
    Text(String),
}

impl ResponseCode {
    pub(crate) fn as_u16(&self) -> Option<u16> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Fields shared by every response, including errors
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub cod: Option<ResponseCode>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl Envelope {
    pub(crate) fn code(&self) -> Option<u16> {
        self.cod.as_ref().and_then(ResponseCode::as_u16)
    }

    /// Error text; `message` is a number (0) on successful forecasts
    pub(crate) fn message_text(&self) -> String {
        match &self.message {
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => "Unknown error".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    #[serde(default)]
    pub name: String,
    pub main: MainBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainBlock {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionBlock {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastItem>,
    #[serde(default)]
    pub city: Option<CityBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastItem {
    pub dt_txt: String,
    pub main: MainBlock,
    #[serde(default)]
    pub pop: Option<f64>,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CityBlock {
    #[serde(default)]
    pub name: String,
}
