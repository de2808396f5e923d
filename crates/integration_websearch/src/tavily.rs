//! Tavily search API client

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    SearchProvider, WebSearchConfig, WebSearchError, WebSearchResponse, models::SearchResult,
};

/// Tavily returns these for exhausted plan quotas
const PLAN_LIMIT_STATUSES: [u16; 2] = [432, 433];

#[derive(Debug, Serialize)]
struct TavilySearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Tavily search client
pub struct TavilyClient {
    client: Client,
    config: WebSearchConfig,
}

impl std::fmt::Debug for TavilyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TavilyClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TavilyClient {
    /// Create a new Tavily client
    ///
    /// A missing API key is not an error here; searches fail with
    /// [`WebSearchError::ConfigurationError`] until one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: WebSearchConfig) -> Result<Self, WebSearchError> {
        config
            .validate()
            .map_err(WebSearchError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WebSearchError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            search_depth = %config.search_depth,
            "Tavily client initialized"
        );

        Ok(Self { client, config })
    }

    /// Configured default result count
    #[must_use]
    pub const fn default_max_results(&self) -> usize {
        self.config.max_results
    }

    fn map_status(status: StatusCode, body: &str, retry_after: Option<u64>) -> WebSearchError {
        let detail = error_detail(body);
        match status.as_u16() {
            401 | 403 => WebSearchError::AuthenticationFailed(detail),
            429 => WebSearchError::RateLimitExceeded {
                retry_after_secs: retry_after,
            },
            code if PLAN_LIMIT_STATUSES.contains(&code) => WebSearchError::RateLimitExceeded {
                retry_after_secs: None,
            },
            400 => WebSearchError::InvalidQuery(detail),
            code if code >= 500 => {
                WebSearchError::ServiceUnavailable(format!("HTTP {status}: {detail}"))
            }
            _ => WebSearchError::RequestFailed(format!("HTTP {status}: {detail}")),
        }
    }
}

/// Pull a readable message out of an error body
///
/// Tavily wraps errors as `{"detail": {"error": "..."}}`; older responses use
/// `{"detail": "..."}`.
fn error_detail(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.pointer("/detail/error")
                .or_else(|| v.get("detail"))
                .or_else(|| v.get("error"))
        })
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| body.trim().to_string(), ToString::to_string)
}

#[async_trait]
impl SearchProvider for TavilyClient {
    #[instrument(skip(self), fields(provider = "tavily"))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<WebSearchResponse, WebSearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WebSearchError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }

        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            WebSearchError::ConfigurationError("Tavily API key is required".to_string())
        })?;

        let body = TavilySearchRequest {
            api_key,
            query,
            search_depth: &self.config.search_depth,
            max_results: max_results.clamp(1, 20),
        };

        let start = Instant::now();
        debug!(max_results = body.max_results, "Sending Tavily search request");

        let response = self
            .client
            .post(self.config.search_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| WebSearchError::from_reqwest(&e, self.config.timeout_secs))?;

        let status = response.status();
        debug!(status = %status, "Received Tavily response");

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok());
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %error_text, "Tavily search failed");
            return Err(Self::map_status(status, &error_text, retry_after));
        }

        let api_response: TavilySearchResponse = response
            .json()
            .await
            .map_err(|e| WebSearchError::ParseError(e.to_string()))?;

        let elapsed = start.elapsed();
        let mut response =
            WebSearchResponse::new(query.to_string(), api_response.results, "tavily");
        response.search_time_ms = Some(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));

        debug!(
            results = response.results.len(),
            time_ms = elapsed.as_millis(),
            "Tavily search completed"
        );

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "tavily"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = WebSearchConfig {
            search_depth: "deep".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            TavilyClient::new(config),
            Err(WebSearchError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_request_serialization() {
        let body = TavilySearchRequest {
            api_key: "tvly-k",
            query: "Hunza valley",
            search_depth: "basic",
            max_results: 3,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "api_key": "tvly-k",
                "query": "Hunza valley",
                "search_depth": "basic",
                "max_results": 3
            })
        );
    }

    #[test]
    fn test_error_detail_shapes() {
        assert_eq!(
            error_detail(r#"{"detail": {"error": "Unauthorized: missing or invalid API key."}}"#),
            "Unauthorized: missing or invalid API key."
        );
        assert_eq!(error_detail(r#"{"detail": "Bad query"}"#), "Bad query");
        assert_eq!(error_detail(" plain text "), "plain text");
    }

    #[test]
    fn test_map_status() {
        assert!(matches!(
            TavilyClient::map_status(StatusCode::UNAUTHORIZED, "{}", None),
            WebSearchError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            TavilyClient::map_status(StatusCode::TOO_MANY_REQUESTS, "", Some(30)),
            WebSearchError::RateLimitExceeded {
                retry_after_secs: Some(30)
            }
        ));
        let plan_limit = StatusCode::from_u16(432).unwrap();
        assert!(matches!(
            TavilyClient::map_status(plan_limit, "", None),
            WebSearchError::RateLimitExceeded { .. }
        ));
        assert!(matches!(
            TavilyClient::map_status(StatusCode::BAD_GATEWAY, "", None),
            WebSearchError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            TavilyClient::map_status(StatusCode::NOT_FOUND, "", None),
            WebSearchError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let client = TavilyClient::new(WebSearchConfig {
            api_key: Some("tvly-secret".to_string()),
            ..Default::default()
        })
        .unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("tvly-secret"));
    }
}
