//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! provider, speech, weather and search crates, and owns configuration
//! loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{ApiKeys, AppConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
