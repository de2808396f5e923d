//! OpenWeatherMap weather integration
//!
//! Client for the OpenWeatherMap API (<https://openweathermap.org/api>).
//! Provides current conditions and the 5-day / 3-hour forecast by city name.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{CurrentWeather, Forecast, ForecastEntry};
