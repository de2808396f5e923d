//! Application layer - Use cases and orchestration
//!
//! Defines the ports the assistant needs (completion, vision, speech, weather,
//! web search) and the services that orchestrate them. Adapters in the
//! infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
