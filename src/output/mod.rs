//! Output module for run reporting
//!
//! This module handles:
//! - Recording per-page outcomes during a scrape
//! - Building the end-of-run report
//! - Printing the report for the command line

pub mod stats;

pub use stats::{print_report, ScrapeReport, ScrapeStats};
