// Brave Search API client and image download

use super::{ImageSearchResult, SearchError, SearchResult, WebSearch};
use crate::compose::decode_image;
use crate::config::SearchConfig;
use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, MAX_IMAGE_RESULTS};
use crate::retry::{with_rate_limit_retry, RetryPolicy};
use image::RgbaImage;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36";

#[derive(Debug, Default, Deserialize)]
struct WebResponse {
    #[serde(default)]
    web: WebSection,
}

#[derive(Debug, Default, Deserialize)]
struct WebSection {
    #[serde(default)]
    results: Vec<WebHit>,
}

#[derive(Debug, Deserialize)]
struct WebHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    results: Vec<ImageHit>,
}

#[derive(Debug, Deserialize)]
struct ImageHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    properties: Option<ImageProperties>,
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct ImageProperties {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    src: Option<String>,
}

impl From<ImageHit> for ImageSearchResult {
    fn from(hit: ImageHit) -> Self {
        let image_url = hit
            .properties
            .and_then(|p| p.url)
            .filter(|u| !u.is_empty())
            .unwrap_or(hit.url);
        ImageSearchResult {
            title: hit.title,
            image_url,
            thumbnail_url: hit.thumbnail.and_then(|t| t.src).unwrap_or_default(),
        }
    }
}

/// Parse a web search response body
pub(crate) fn parse_web_results(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let response: WebResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;
    Ok(response
        .web
        .results
        .into_iter()
        .map(|hit| SearchResult {
            title: hit.title,
            description: hit.description,
            url: hit.url,
        })
        .collect())
}

/// Parse an image search response body
pub(crate) fn parse_image_results(body: &str) -> Result<Vec<ImageSearchResult>, SearchError> {
    let response: ImageResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;
    Ok(response.results.into_iter().map(Into::into).collect())
}

/// [`WebSearch`] over the Brave Search REST API
pub struct BraveSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl BraveSearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry.to_retry_policy(),
        })
    }

    fn get_json<T>(
        &self,
        path: &str,
        query: &str,
        count: u32,
        parse: fn(&str) -> Result<T, SearchError>,
    ) -> Result<T, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::MissingApiKey);
        }
        let url = format!("{}/{}", self.base_url, path);
        let count = count.to_string();

        with_rate_limit_retry(&self.retry, std::thread::sleep, || {
            let response = self
                .client
                .get(&url)
                .query(&[("q", query), ("count", count.as_str())])
                .header("X-Subscription-Token", &self.api_key)
                .header("Accept", "application/json")
                .send()
                .map_err(|e| SearchError::Http(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SearchError::from_status(status.as_u16()));
            }

            let body = response
                .text()
                .map_err(|e| SearchError::Http(e.to_string()))?;
            parse(&body)
        })
    }
}

impl WebSearch for BraveSearchClient {
    fn web_search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>, SearchError> {
        let results = self.get_json("web/search", query, count, parse_web_results)?;
        debug!(query = %query, results = results.len(), "Web search complete");
        Ok(results)
    }

    fn image_search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<ImageSearchResult>, SearchError> {
        let count = max_results.min(MAX_IMAGE_RESULTS);
        let results = self.get_json("images/search", query, count, parse_image_results)?;
        debug!(query = %query, results = results.len(), "Image search complete");
        Ok(results)
    }
}

/// Download and decode an image, returning `None` on any failure.
pub fn fetch_image(url: &str) -> Option<RgbaImage> {
    match try_fetch_image(url) {
        Ok(img) => {
            debug!(url = %url, width = img.width(), height = img.height(), "Fetched image");
            Some(img)
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Image download failed");
            None
        }
    }
}

fn try_fetch_image(url: &str) -> Result<RgbaImage, String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| format!("Failed to fetch image: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {} when fetching image", status.as_u16()));
    }

    let bytes = response
        .bytes()
        .map_err(|e| format!("Failed to read response body: {}", e))?;
    decode_image(&bytes).map_err(|e| e.to_string())
}
