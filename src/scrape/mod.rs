//! Crawl-to-archive pipeline
//!
//! This module ties the pieces together for one run:
//! 1. Validate the start URL and prepare the output and temp directories
//! 2. Crawl the site, rendering every fetched page into a temporary PDF
//! 3. Package the PDFs into a single ZIP archive
//! 4. Report what happened

mod session;

use crate::archive::create_archive;
use crate::config::Config;
use crate::crawler::crawl;
use crate::output::ScrapeReport;
use crate::render::{PageLayout, PdfRenderer};
use crate::url::parse_start_url;
use crate::{Result, ScrapeError, UrlError};
use chrono::Utc;
use session::Session;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How fetched pages are turned into document text
///
/// Line cleaning only applies to extracted text, so `clean` is ignored
/// unless `strip` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeOptions {
    strip: bool,
    clean: bool,
}

impl ScrapeOptions {
    /// # Examples
    ///
    /// ```
    /// use scrapedf::ScrapeOptions;
    ///
    /// assert!(ScrapeOptions::new(true, true).clean());
    /// assert!(!ScrapeOptions::new(false, true).clean());
    /// ```
    pub fn new(strip: bool, clean: bool) -> Self {
        Self {
            strip,
            clean: strip && clean,
        }
    }

    /// Render extracted text instead of the raw response
    pub fn strip(&self) -> bool {
        self.strip
    }

    /// Drop lines of two words or fewer from the extracted text
    pub fn clean(&self) -> bool {
        self.clean
    }
}

/// Scrapes one site into a ZIP of per-page PDFs
#[derive(Debug, Clone, Default)]
pub struct Scraper {
    config: Config,
    options: ScrapeOptions,
}

impl Scraper {
    pub fn new(config: Config, options: ScrapeOptions) -> Self {
        Self { config, options }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn options(&self) -> ScrapeOptions {
        self.options
    }

    /// Crawls from `start_url` and writes the archive to `output_path`
    ///
    /// The directory containing `output_path` is created if missing. An
    /// existing file at `output_path` is overwritten. Temporary documents are
    /// removed on every exit path.
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeReport)` - The archive was written
    /// * `Err(ScrapeError)` - The run failed; no archive was written
    pub async fn scrape_and_save(&self, start_url: &str, output_path: &Path) -> Result<ScrapeReport> {
        let started_at = Utc::now();
        let (start, _host) = parse_start_url(start_url)?;

        let output_dir = output_dir_of(output_path);
        std::fs::create_dir_all(output_dir).map_err(|source| ScrapeError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let renderer = PdfRenderer::new(PageLayout::from(&self.config.render));
        let session =
            Arc::new(Session::new(self.options, renderer).map_err(ScrapeError::TempDir)?);

        let summary = crawl(start.as_str(), self.config.crawler.clone(), Arc::clone(&session)).await?;

        let artifacts = session.artifacts();
        if artifacts.is_empty() {
            return Err(ScrapeError::NoPages);
        }

        tracing::info!(
            "Archiving {} pages to {}",
            artifacts.len(),
            output_path.display()
        );
        let entries = create_archive(output_path, &artifacts)?;

        let mut report = ScrapeReport::from_stats(
            session.stats(),
            start.as_str(),
            output_path.to_path_buf(),
            started_at,
            entries,
        );
        report.max_depth_reached = summary.max_depth_reached;

        Ok(report)
    }
}

/// Where the archive for `start_url` goes inside `output_dir`: `{dir}/{host}.zip`
///
/// # Examples
///
/// ```
/// use scrapedf::scrape::archive_path;
/// use std::path::{Path, PathBuf};
///
/// let path = archive_path(Path::new("out"), "https://example.com:8080/docs").unwrap();
/// assert_eq!(path, PathBuf::from("out/example.com.zip"));
/// ```
pub fn archive_path(output_dir: &Path, start_url: &str) -> std::result::Result<PathBuf, UrlError> {
    let (_, host) = parse_start_url(start_url)?;
    Ok(output_dir.join(format!("{}.zip", host)))
}

fn output_dir_of(output_path: &Path) -> &Path {
    match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
