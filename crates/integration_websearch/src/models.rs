//! Web search data models

use serde::{Deserialize, Serialize};

/// Rendered in place of an empty result list
pub const NO_RESULTS_TEXT: &str = "No results found.";

fn default_title() -> String {
    "No Title".to_string()
}

fn default_url() -> String {
    "#".to_string()
}

fn default_content() -> String {
    "No Content".to_string()
}

/// A single search result
///
/// Missing fields fall back to placeholder text so a partial result still
/// renders as a readable bullet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_url")]
    pub url: String,

    /// Extracted page content relevant to the query
    #[serde(default = "default_content")]
    pub content: String,

    /// Relevance score assigned by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResult {
    /// Create a new search result
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            score: None,
        }
    }

    /// Format as a markdown bullet: `- **title**: content [Link](url)`
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!("- **{}**: {} [Link]({})", self.title, self.content, self.url)
    }
}

/// Response from a web search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResponse {
    /// Original search query
    pub query: String,

    /// List of search results
    pub results: Vec<SearchResult>,

    /// Search provider used (e.g., "tavily")
    pub provider: String,

    /// Time taken for the search in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_time_ms: Option<u64>,
}

impl WebSearchResponse {
    /// Create a new search response
    #[must_use]
    pub fn new(query: String, results: Vec<SearchResult>, provider: &str) -> Self {
        Self {
            query,
            results,
            provider: provider.to_string(),
            search_time_ms: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Render all results as markdown bullets, one per line
    ///
    /// Returns [`NO_RESULTS_TEXT`] when there are none.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        if self.results.is_empty() {
            return NO_RESULTS_TEXT.to_string();
        }

        self.results
            .iter()
            .map(SearchResult::to_markdown)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
