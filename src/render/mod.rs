//! Page rendering
//!
//! This module handles:
//! - Filtering short lines out of extracted text ("clean" mode)
//! - Page geometry and line wrapping
//! - Writing paginated PDF documents

mod clean;
mod layout;
mod pdf;

pub use clean::clean_lines;
pub use layout::{content_lines, wrap_line, PageLayout};
pub use pdf::PdfRenderer;

use crate::RenderError;
use std::path::Path;

/// Writes a text payload as a paginated document at `path`
pub trait DocumentRenderer: Send + Sync {
    /// Renders `text` into a document file
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The document was fully written
    /// * `Err(RenderError)` - Rendering or writing failed; `path` may hold a
    ///   partial file
    fn render(&self, text: &str, path: &Path) -> Result<(), RenderError>;
}
