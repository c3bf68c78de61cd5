//! URL handling module for scrapedf
//!
//! This module provides URL normalization, host extraction, the same-host
//! crawl restriction and archive entry naming.

mod domain;
mod naming;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, is_same_host};
pub use naming::{entry_name, sanitize_path};
pub use normalize::normalize_url;

use crate::UrlError;

/// Normalizes a start URL and returns it together with its host
///
/// # Arguments
///
/// * `url_str` - The user supplied start URL
///
/// # Returns
///
/// * `Ok((Url, String))` - The normalized URL and its lowercase host
/// * `Err(UrlError)` - The URL cannot be crawled
///
/// # Examples
///
/// ```
/// use scrapedf::url::parse_start_url;
///
/// let (url, host) = parse_start_url("https://Docs.Example.com/guide").unwrap();
/// assert_eq!(url.as_str(), "https://docs.example.com/guide");
/// assert_eq!(host, "docs.example.com");
/// ```
pub fn parse_start_url(url_str: &str) -> Result<(::url::Url, String), UrlError> {
    let url = normalize_url(url_str)?;
    let host = extract_domain(&url).ok_or(UrlError::MissingDomain)?;
    Ok((url, host))
}
