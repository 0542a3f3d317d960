//! Document Renderer — paginates plain text into a letter-sized PDF.
//!
//! Layout constants: US letter (612x792pt), 50pt margins, 15pt line height,
//! Helvetica 12pt. The first baseline sits at `height - margin`; a new page
//! starts when the next baseline would drop below the bottom margin.

pub mod handlers;

use std::io::BufWriter;

use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};

const PAGE_WIDTH_PT: f64 = 612.0;
const PAGE_HEIGHT_PT: f64 = 792.0;
const MARGIN_PT: f64 = 50.0;
const LINE_HEIGHT_PT: f64 = 15.0;
const FONT_SIZE: f64 = 12.0;

fn pt_to_mm(pt: f64) -> Mm {
    Mm::from(Pt(pt as f32))
}

/// Number of text baselines that fit on one page.
pub fn lines_per_page() -> usize {
    (((PAGE_HEIGHT_PT - 2.0 * MARGIN_PT) / LINE_HEIGHT_PT) as usize) + 1
}

/// Normalizes line endings and splits `text` into pages of at most
/// `lines_per_page` lines. Empty input still yields one page with one
/// (empty) line, matching how an empty document renders.
pub fn paginate(text: &str) -> Vec<Vec<String>> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();

    lines
        .chunks(lines_per_page())
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Renders `text` into a paginated PDF and returns the serialized bytes.
pub fn render_pdf(text: &str) -> Result<Vec<u8>> {
    let pages = paginate(text);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "document",
        pt_to_mm(PAGE_WIDTH_PT),
        pt_to_mm(PAGE_HEIGHT_PT),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("Failed to load builtin font: {e}"))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(
                pt_to_mm(PAGE_WIDTH_PT),
                pt_to_mm(PAGE_HEIGHT_PT),
                "Layer 1",
            );
            doc.get_page(page_index).get_layer(layer_index)
        };

        let mut y = PAGE_HEIGHT_PT - MARGIN_PT;
        for line in page {
            layer.use_text(line.clone(), FONT_SIZE as f32, pt_to_mm(MARGIN_PT), pt_to_mm(y), &font);
            y -= LINE_HEIGHT_PT;
        }
    }

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer)
        .map_err(|e| anyhow!("Failed to serialize PDF: {e}"))?;
    buffer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush PDF buffer: {e}"))
}
