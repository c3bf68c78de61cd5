//! Readable-text extraction from HTML
//!
//! This module turns a parsed HTML document into plain text with paragraph,
//! heading and list formatting expressed through line breaks and bullet
//! markers. Scripts, styles and other non-content elements are dropped.
//!
//! # Example
//!
//! ```
//! use scrapedf::extract::strip_html;
//!
//! let text = strip_html(b"<ul><li>First</li><li>Second</li></ul>");
//! assert_eq!(text, "• First\n• Second\n\n");
//! ```

mod rules;
mod walker;

pub use rules::{is_inline_styling, is_suppressed, FormatRule, WalkState, BULLET};

use scraper::Html;
use walker::Walker;

/// Parses decoded HTML into a document tree
///
/// Malformed markup is repaired by the parser, so every input yields a tree.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Extracts normalized readable text from a parsed document
///
/// Non-empty output always ends with exactly two newlines; a document with
/// no readable text yields an empty string.
pub fn extract_text(document: &Html) -> String {
    let mut walker = Walker::new();
    walker.visit(document.tree.root());
    walker.finish()
}

/// Parses `body` and extracts its readable text
///
/// The body is read as UTF-8 with invalid sequences replaced by U+FFFD.
/// Callers that know the response charset should decode first and use
/// [`parse_document`] with [`extract_text`].
pub fn strip_html(body: &[u8]) -> String {
    let html = String::from_utf8_lossy(body);
    extract_text(&parse_document(&html))
}
