//! Web search service port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Rendered in place of an empty hit list
const NO_RESULTS: &str = "No results found.";

/// A single search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl SearchHit {
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
        }
    }

    /// `- **title**: content [Link](url)`
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!("- **{}**: {} [Link]({})", self.title, self.content, self.url)
    }
}

/// Render hits as markdown bullets, one per line
#[must_use]
pub fn render_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return NO_RESULTS.to_string();
    }
    hits.iter()
        .map(SearchHit::to_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Port for web search operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WebSearchPort: Send + Sync {
    /// Search the web; an empty list is a valid answer
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ApplicationError>;
}
