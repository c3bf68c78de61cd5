//! scrapedf: crawl a website and archive every page as a PDF
//!
//! This crate walks a single host from a start URL, turns each fetched page
//! into a PDF (either the raw response or its extracted readable text) and
//! packages the PDFs into one ZIP archive.

pub mod archive;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod render;
pub mod scrape;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for top-level scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL: {0}")]
    Url(#[from] UrlError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] crawler::CrawlError),

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create temp directory: {0}")]
    TempDir(std::io::Error),

    #[error("No pages were successfully scraped")]
    NoPages,

    #[error("Failed to create ZIP file: {0}")]
    Archive(#[from] ArchiveError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Errors raised while writing a page document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while packaging artifacts
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("No artifacts to archive")]
    Empty,

    #[error("Failed to open artifact {path}: {source}")]
    OpenArtifact {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid artifact URL {url}: {source}")]
    InvalidUrl { url: String, source: UrlError },

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for top-level scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::extract::{extract_text, strip_html};
pub use crate::scrape::{ScrapeOptions, Scraper};
pub use crate::url::{entry_name, extract_domain, normalize_url};
