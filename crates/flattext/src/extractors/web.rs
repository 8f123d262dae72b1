//! Web page extractor and the HTTP fetcher behind it.

use crate::core::config::ExtractionConfig;
use crate::extraction::html::extract_html_text;
use crate::extractors::run_blocking;
use crate::plugins::{DocumentExtractor, ExtractionInput, Plugin};
use crate::types::FormatTag;
use crate::{FlattextError, Result};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::sync::Arc;

/// Retrieves the body of a web page.
///
/// The default implementation is [`ReqwestPageFetcher`]; tests substitute
/// their own to avoid the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the decoded response body.
    ///
    /// # Errors
    ///
    /// `FlattextError::Network` for unreachable hosts, timeouts and non-2xx responses.
    async fn fetch(&self, url: &str, config: &ExtractionConfig) -> Result<String>;
}

/// [`PageFetcher`] over `reqwest`, sending the configured browser User-Agent.
#[derive(Debug, Default, Clone)]
pub struct ReqwestPageFetcher;

impl ReqwestPageFetcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch(&self, url: &str, config: &ExtractionConfig) -> Result<String> {
        let client = build_http_client(config)?;

        let response = client.get(url).send().await.map_err(|e| request_error(url, e))?;
        let response = ensure_success(url, response)?;

        response.text().await.map_err(|e| request_error(url, e))
    }
}

/// Build a client honoring the configured timeout, User-Agent and redirect cap.
pub(crate) fn build_http_client(config: &ExtractionConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.fetch_timeout())
        .redirect(Policy::limited(config.max_redirects))
        .build()
        .map_err(|e| FlattextError::network_with_source(format!("Failed to build HTTP client: {}", e), e))
}

/// Turn a non-2xx response into a `Network` error carrying the status line.
pub(crate) fn ensure_success(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(FlattextError::network(format!(
        "{} {} for url: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status"),
        url
    )))
}

pub(crate) fn request_error(url: &str, err: reqwest::Error) -> FlattextError {
    let message = if err.is_timeout() {
        format!("Request to {} timed out: {}", url, err)
    } else if err.is_connect() {
        format!("Failed to connect to {}: {}", url, err)
    } else {
        format!("Request to {} failed: {}", url, err)
    };
    FlattextError::network_with_source(message, err)
}

/// Extractor for arbitrary web pages.
///
/// Fetches the page and applies the same visible-text normalization as
/// uploaded HTML files.
pub struct WebPageExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl WebPageExtractor {
    /// Create a web page extractor that fetches over HTTP.
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(ReqwestPageFetcher::new()))
    }

    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

impl Default for WebPageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for WebPageExtractor {
    fn name(&self) -> &str {
        "webpage-extractor"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        "Fetches web pages and extracts their visible text"
    }
}

#[async_trait]
impl DocumentExtractor for WebPageExtractor {
    async fn extract(&self, input: ExtractionInput, config: &ExtractionConfig) -> Result<String> {
        let url = input.into_url()?;

        let body = self.fetcher.fetch(&url, config).await?;
        tracing::debug!(url = %url, body_bytes = body.len(), "Fetched web page");

        run_blocking("HTML", move || Ok(extract_html_text(&body))).await
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Webpage]
    }
}
