//! PDF output via printpdf

use super::layout::PageLayout;
use super::DocumentRenderer;
use crate::RenderError;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::path::Path;

const LAYER_NAME: &str = "Text";

/// Renders text into a paginated PDF with a built-in Helvetica font
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PageLayout,
}

impl PdfRenderer {
    /// Creates a renderer with the given page geometry
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Renders `text` and returns the encoded PDF
    pub fn render_to_bytes(&self, title: &str, text: &str) -> Result<Vec<u8>, RenderError> {
        let layout = &self.layout;
        let width = Mm(layout.page_width_mm);
        let height = Mm(layout.page_height_mm);

        let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        for (index, rows) in layout.paginate(text).iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(width, height, LAYER_NAME);
                doc.get_page(page).get_layer(layer)
            };

            let mut baseline = layout.first_baseline_mm();
            for row in rows {
                layer.use_text(
                    row.as_str(),
                    layout.font_size,
                    Mm(layout.margin_mm),
                    Mm(baseline),
                    &font,
                );
                baseline -= layout.line_height_mm;
            }
        }

        doc.save_to_bytes()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, text: &str, path: &Path) -> Result<(), RenderError> {
        let title = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("page");
        let bytes = self.render_to_bytes(title, text)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
