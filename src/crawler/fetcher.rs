//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests to fetch page content
//! - Error classification (timeout, connection, HTTP status)

use crate::config::CrawlerConfig;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A successfully fetched response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    pub content_type: Option<String>,

    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Returns true if the response should be scanned for links
    ///
    /// A missing Content-Type is treated as HTML.
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(true, |ct| ct.to_ascii_lowercase().contains("html"))
    }

    /// Body decoded to text
    ///
    /// Uses the charset named in Content-Type when it is a known label, a
    /// byte order mark when present, and UTF-8 otherwise. Malformed sequences
    /// are replaced with U+FFFD, so decoding never fails.
    pub fn text(&self) -> String {
        let encoding = self.declared_encoding().unwrap_or(UTF_8);
        let (text, _, had_errors) = encoding.decode(&self.body);
        if had_errors {
            tracing::debug!("Replaced malformed {} sequences in {}", encoding.name(), self.url);
        }
        text.into_owned()
    }

    fn declared_encoding(&self) -> Option<&'static Encoding> {
        let content_type = self.content_type.as_deref()?;
        content_type.split(';').skip(1).find_map(|param| {
            let (name, value) = param.split_once('=')?;
            if !name.trim().eq_ignore_ascii_case("charset") {
                return None;
            }
            Encoding::for_label(value.trim().trim_matches('"').as_bytes())
        })
    }
}

/// Errors for a single failed fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    #[error("Request failed for {url}: {source}")]
    Request { url: String, source: reqwest::Error },
}

impl FetchError {
    /// URL the failed request was for
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Status { url, .. }
            | Self::Request { url, .. } => url,
        }
    }

    /// True when no HTTP response was received at all
    pub fn is_network(&self) -> bool {
        !matches!(self, Self::Status { .. })
    }

    fn from_reqwest(url: &Url, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            Self::Timeout { url }
        } else if error.is_connect() {
            Self::Connect { url, source: error }
        } else {
            Self::Request { url, source: error }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy; the crawler checks
/// the final URL's host itself.
///
/// # Example
///
/// ```
/// use scrapedf::config::CrawlerConfig;
/// use scrapedf::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and reads the full body
///
/// Non-2xx responses are reported as [`FetchError::Status`].
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?
        .to_vec();

    Ok(FetchedPage {
        url: final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}
