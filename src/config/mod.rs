//! Configuration module for scrapedf
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every setting has a default, so the crawler runs
//! without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use scrapedf::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scrapedf.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, RenderConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
pub use validation::validate;
