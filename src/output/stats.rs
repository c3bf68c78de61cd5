//! Per-run scrape statistics
//!
//! This module provides counters that the scrape session updates from
//! concurrent page callbacks, and the report built from them once the run
//! is finished.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for one scrape run
///
/// All counters are updated with relaxed atomics; they are only read once
/// the crawl has completed.
#[derive(Debug, Default)]
pub struct ScrapeStats {
    pages_fetched: AtomicU64,
    fetch_errors: AtomicU64,
    render_failures: AtomicU64,
    duplicates: AtomicU64,
}

impl ScrapeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_error(&self) {
        self.fetch_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_render_failure(&self) {
        self.render_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// A response whose final URL had already produced a document
    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched.load(Ordering::Relaxed)
    }

    pub fn fetch_errors(&self) -> u64 {
        self.fetch_errors.load(Ordering::Relaxed)
    }

    pub fn render_failures(&self) -> u64 {
        self.render_failures.load(Ordering::Relaxed)
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates.load(Ordering::Relaxed)
    }
}

/// Summary of a finished scrape run
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    /// URL the crawl started from
    pub start_url: String,

    /// Archive written by the run
    pub archive_path: PathBuf,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the archive was finished
    pub finished_at: DateTime<Utc>,

    /// Responses handed to the session
    pub pages_fetched: u64,

    /// Documents written to the archive
    pub pages_archived: u64,

    pub fetch_errors: u64,
    pub render_failures: u64,
    pub duplicates: u64,

    /// Deepest crawl level reached
    pub max_depth_reached: u32,

    /// Archive entry names in archive order
    pub entries: Vec<String>,
}

impl ScrapeReport {
    /// Builds a report from the run's counters
    pub fn from_stats(
        stats: &ScrapeStats,
        start_url: impl Into<String>,
        archive_path: PathBuf,
        started_at: DateTime<Utc>,
        entries: Vec<String>,
    ) -> Self {
        Self {
            start_url: start_url.into(),
            archive_path,
            started_at,
            finished_at: Utc::now(),
            pages_fetched: stats.pages_fetched(),
            pages_archived: entries.len() as u64,
            fetch_errors: stats.fetch_errors(),
            render_failures: stats.render_failures(),
            duplicates: stats.duplicates(),
            max_depth_reached: 0,
            entries,
        }
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds().max(0)
    }

    /// Pages that were fetched or attempted but are missing from the archive
    pub fn total_failures(&self) -> u64 {
        self.fetch_errors + self.render_failures
    }
}

/// Prints a run report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_report(report: &ScrapeReport) {
    println!("=== Scrape Summary ===\n");

    println!("Overview:");
    println!("  Start URL: {}", report.start_url);
    println!("  Started: {}", report.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Duration: {}s", report.duration_seconds());
    println!("  Deepest level: {}", report.max_depth_reached);
    println!();

    println!("Pages:");
    println!("  Fetched: {}", report.pages_fetched);
    println!("  Archived: {}", report.pages_archived);
    if report.duplicates > 0 {
        println!("  Duplicates skipped: {}", report.duplicates);
    }
    println!();

    if report.total_failures() > 0 {
        println!("Failures:");
        println!("  Fetch: {}", report.fetch_errors);
        println!("  Render: {}", report.render_failures);
        println!();
    }

    println!("Archive: {}", report.archive_path.display());
}
