//! Web search adapter - Implements WebSearchPort using integration_websearch

use application::error::ApplicationError;
use application::ports::{SearchHit, WebSearchPort};
use async_trait::async_trait;
use domain::DomainError;
use integration_websearch::{
    SearchProvider, SearchResult, TavilyClient, WebSearchConfig, WebSearchError,
};
use tracing::{debug, instrument};

/// Adapter for Tavily search
#[derive(Debug)]
pub struct WebSearchAdapter {
    client: TavilyClient,
}

impl WebSearchAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: WebSearchConfig) -> Result<Self, ApplicationError> {
        let client =
            TavilyClient::new(config).map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration search error to application error
    fn map_error(err: WebSearchError) -> ApplicationError {
        match err {
            WebSearchError::InvalidQuery(e) => DomainError::validation(e).into(),
            WebSearchError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            WebSearchError::AuthenticationFailed(_) | WebSearchError::ConfigurationError(_) => {
                ApplicationError::Configuration(err.to_string())
            }
            WebSearchError::ConnectionFailed(_)
            | WebSearchError::RequestFailed(_)
            | WebSearchError::ParseError(_)
            | WebSearchError::ServiceUnavailable(_)
            | WebSearchError::Timeout { .. } => ApplicationError::ExternalService(err.to_string()),
        }
    }

    fn map_result(result: SearchResult) -> SearchHit {
        SearchHit::new(result.title, result.url, result.content)
    }
}

#[async_trait]
impl WebSearchPort for WebSearchAdapter {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ApplicationError> {
        let response = self
            .client
            .search(query, max_results)
            .await
            .map_err(Self::map_error)?;
        debug!(
            results = response.results.len(),
            time_ms = ?response.search_time_ms,
            "Web search completed"
        );
        Ok(response.results.into_iter().map(Self::map_result).collect())
    }
}
