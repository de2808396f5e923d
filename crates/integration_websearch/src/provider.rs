//! Search provider trait

use async_trait::async_trait;

use crate::{WebSearchError, WebSearchResponse};

/// Trait for web search providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// An empty result list is a successful response, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is blank or the search fails.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<WebSearchResponse, WebSearchError>;

    /// Get the provider name (e.g., "tavily")
    fn provider_name(&self) -> &'static str;
}
