//! Web and image search
//!
//! Trend research and product image lookup go through the [`WebSearch`]
//! trait. [`BraveSearchClient`] talks to the Brave Search API; tests use a
//! mock. Lookups are best-effort: the `*_or_empty` helpers and
//! [`fetch_image`] log a warning and return nothing instead of failing.

pub mod brave;

pub use brave::{fetch_image, BraveSearchClient};

use crate::retry::{RateLimited, TOO_MANY_REQUESTS};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors from the search provider
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Rate limited by search provider")]
    RateLimited,

    #[error("Search provider returned status {0}")]
    Status(u16),

    #[error("Failed to decode search response: {0}")]
    Decode(String),

    #[error("No search API key configured")]
    MissingApiKey,
}

impl SearchError {
    /// Map a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        if status == TOO_MANY_REQUESTS {
            SearchError::RateLimited
        } else {
            SearchError::Status(status)
        }
    }
}

impl RateLimited for SearchError {
    fn is_rate_limited(&self) -> bool {
        matches!(self, SearchError::RateLimited)
    }
}

/// One web search hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl SearchResult {
    /// Lowercased `title + " " + description`, used for keyword matching
    pub fn signal(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

/// One image search hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSearchResult {
    pub title: String,
    pub image_url: String,
    pub thumbnail_url: String,
}

/// Search provider seam
#[cfg_attr(test, mockall::automock)]
pub trait WebSearch: Send + Sync {
    fn web_search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>, SearchError>;

    fn image_search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<ImageSearchResult>, SearchError>;
}

/// Web search that recovers every failure into an empty result set.
pub fn web_search_or_empty(search: &dyn WebSearch, query: &str, count: u32) -> Vec<SearchResult> {
    match search.web_search(query, count) {
        Ok(results) => results,
        Err(e) => {
            warn!(query = %query, error = %e, "Web search failed, continuing without results");
            Vec::new()
        }
    }
}

/// Image search that recovers every failure into an empty result set.
pub fn search_images(search: &dyn WebSearch, query: &str, max_results: u32) -> Vec<ImageSearchResult> {
    match search.image_search(query, max_results) {
        Ok(results) => results,
        Err(e) => {
            warn!(query = %query, error = %e, "Image search failed, continuing without results");
            Vec::new()
        }
    }
}
