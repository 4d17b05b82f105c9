//! PDF Exporter — writes laid-out pages with `printpdf`.
//!
//! Two conceptual passes: `layout::paginate_*` places every line first, then
//! this writer creates the pages and stamps each footer with the final
//! "Page x of y" — total count is known before any footer is written.

use std::io::BufWriter;

use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use thiserror::Error;

use crate::report::parser::Section;

pub mod layout;

pub use layout::{ExportMeta, NamedField};

use layout::{footer_lines, paginate_blocks, paginate_fields, Block, FontRole, PageLayout};

const FOOTER_SIZE_PT: f32 = 7.5;
const FOOTER_ATTRIBUTION_Y_MM: f32 = 12.0;
const FOOTER_NUMBER_Y_MM: f32 = 8.0;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF render failed: {0}")]
    Render(String),
}

/// Exports parsed report sections as a paginated PDF. Returns the bytes.
pub fn export_sections(sections: &[Section], meta: &ExportMeta) -> Result<Vec<u8>, PdfError> {
    let blocks: Vec<Block<'_>> = sections
        .iter()
        .map(|s| Block {
            heading: &s.label,
            body: &s.body_text,
        })
        .collect();
    write_pdf(paginate_blocks(&blocks, meta), &meta.title)
}

/// Exports the named-field variant used by the single-shot tools.
pub fn export_fields(fields: &[NamedField], meta: &ExportMeta) -> Result<Vec<u8>, PdfError> {
    write_pdf(paginate_fields(fields, meta), &meta.title)
}

/// Filename for a download: report-type label slug plus timestamp.
pub fn export_filename(report_type_label: &str, at: DateTime<Utc>) -> String {
    let slug: String = report_type_label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    format!("{slug}-{}.pdf", at.format("%Y%m%d-%H%M%S"))
}

fn write_pdf(pages: Vec<PageLayout>, title: &str) -> Result<Vec<u8>, PdfError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(layout::PAGE_WIDTH_MM),
        Mm(layout::PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Render(format!("font error: {e}")))?;

    let total = pages.len();

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(
                Mm(layout::PAGE_WIDTH_MM),
                Mm(layout::PAGE_HEIGHT_MM),
                "Layer 1",
            );
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        for line in &page.lines {
            let font = font_for(&regular, &bold, line.role);
            layer.use_text(
                &line.text,
                line.size_pt,
                Mm(line.x_mm),
                Mm(line.y_mm),
                font,
            );
        }

        write_footer(&layer, &regular, index + 1, total);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| PdfError::Render(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| PdfError::Render(format!("buffer error: {e}")))
}

fn font_for<'a>(
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    role: FontRole,
) -> &'a IndirectFontRef {
    match role {
        FontRole::Title | FontRole::Heading => bold,
        FontRole::Meta | FontRole::Body => regular,
    }
}

fn write_footer(layer: &PdfLayerReference, font: &IndirectFontRef, page: usize, total: usize) {
    let (attribution, numbering) = footer_lines(page, total);
    layer.use_text(
        attribution,
        FOOTER_SIZE_PT,
        Mm(layout::MARGIN_MM),
        Mm(FOOTER_ATTRIBUTION_Y_MM),
        font,
    );
    layer.use_text(
        numbering,
        FOOTER_SIZE_PT,
        Mm(layout::MARGIN_MM),
        Mm(FOOTER_NUMBER_Y_MM),
        font,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::parser::parse;

    fn meta() -> ExportMeta {
        ExportMeta {
            title: "Progress Report".to_string(),
            participant_name: None,
            report_type_label: "Progress Report".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_export_sections_produces_pdf_bytes() {
        let sections = parse("EXECUTIVE SUMMARY\nDoing well.\n\nNEXT STEPS\nReview in May.");
        let bytes = export_sections(&sections, &meta()).expect("export should succeed");
        assert!(bytes.starts_with(b"%PDF"), "output must be a PDF stream");
    }

    #[test]
    fn test_export_fields_produces_pdf_bytes() {
        let fields = vec![NamedField {
            label: "Summary".to_string(),
            value: "All supports in place.".to_string(),
        }];
        let bytes = export_fields(&fields, &meta()).expect("export should succeed");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_filename_is_slug_plus_timestamp() {
        let at = DateTime::parse_from_rfc3339("2026-03-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            export_filename("Support Coordination Report", at),
            "support-coordination-report-20260301-093000.pdf"
        );
    }
}
