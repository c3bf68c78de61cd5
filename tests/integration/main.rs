//! Integration tests for scrapedf
//!
//! These tests use wiremock to serve a small site and run the full
//! crawl-to-archive pipeline end-to-end.

mod scrape_tests;
