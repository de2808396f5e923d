//! Completion errors

use thiserror::Error;

/// Errors a single completion provider can report
///
/// The fallback layer treats every variant the same way: the provider
/// failed and the next one is tried. The variants exist for logging.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the provider failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Model not found or not served by this provider
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request was rejected before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Timeout during completion
    #[error("Completion timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Map a transport error, reporting the configured timeout on expiry
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Map a non-success HTTP status and its body
    pub fn from_status(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status.as_u16() {
            401 | 403 => Self::Authentication(message),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(format!("Status {status}: {message}")),
            _ => Self::RequestFailed(format!("Status {status}: {message}")),
        }
    }
}

/// Terminal outcome of the fallback chain
#[derive(Debug, Error)]
pub enum FallbackError {
    /// Both providers were tried once and both failed
    #[error("All providers failed (primary: {primary}; secondary: {secondary})")]
    AllProvidersFailed {
        /// Error reported by the primary provider
        primary: ProviderError,
        /// Error reported by the secondary provider
        secondary: ProviderError,
    },
}
