//! Crawler module for web page fetching and link following
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeout and error classification
//! - HTML link extraction
//! - Same-host frontier and concurrency limiting
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;
mod visited;

pub use coordinator::{crawl, Coordinator, CrawlSummary, PageHandler};
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
pub use parser::{extract_links, resolve_link};
pub use scheduler::Scheduler;
pub use visited::VisitedSet;

use crate::UrlError;
use thiserror::Error;

/// Errors that end a crawl before it produces anything
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid start URL: {0}")]
    InvalidStartUrl(#[from] UrlError),

    #[error("Could not reach {url}: {source}")]
    StartUnreachable { url: String, source: FetchError },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
