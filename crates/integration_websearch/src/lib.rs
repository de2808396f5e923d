#![forbid(unsafe_code)]
//! Web search integration for LifePlanner
//!
//! Finds places and travel information via the Tavily search API
//! (<https://tavily.com>). Results carry their source URLs and render as a
//! markdown bullet list for inclusion in trip-planning prompts.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_websearch::{SearchProvider, TavilyClient, WebSearchConfig};
//!
//! let config = WebSearchConfig {
//!     api_key: Some("tvly-...".to_string()),
//!     ..Default::default()
//! };
//! let client = TavilyClient::new(config)?;
//!
//! let response = client.search("Best places to visit in Hunza", 3).await?;
//! println!("{}", response.to_markdown());
//! ```

mod config;
mod error;
mod models;
mod provider;
mod tavily;

pub use config::WebSearchConfig;
pub use error::WebSearchError;
pub use models::{NO_RESULTS_TEXT, SearchResult, WebSearchResponse};
pub use provider::SearchProvider;
pub use tavily::TavilyClient;
