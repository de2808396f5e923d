//! Web search configuration

use serde::{Deserialize, Serialize};

/// Depths accepted by the Tavily API
const SEARCH_DEPTHS: [&str; 2] = ["basic", "advanced"];

/// Configuration for the Tavily search client
#[derive(Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    /// Tavily API key (`tvly-...`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Tavily API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of results to request
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// "basic" or "advanced"
    #[serde(default = "default_search_depth")]
    pub search_depth: String,
}

fn default_base_url() -> String {
    "https://api.tavily.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_max_results() -> usize {
    3
}

fn default_search_depth() -> String {
    "basic".to_string()
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            search_depth: default_search_depth(),
        }
    }
}

impl std::fmt::Debug for WebSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_results", &self.max_results)
            .field("search_depth", &self.search_depth)
            .finish()
    }
}

impl WebSearchConfig {
    /// Search endpoint URL
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        if self.max_results > 20 {
            return Err("max_results must be 20 or less".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if !SEARCH_DEPTHS.contains(&self.search_depth.as_str()) {
            return Err(format!(
                "search_depth must be one of: {}",
                SEARCH_DEPTHS.join(", ")
            ));
        }

        Ok(())
    }
}
