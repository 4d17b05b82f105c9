//! Pure pagination pass for PDF export.
//!
//! Layout happens entirely before any PDF object is written: the paginate
//! functions place every line of every page, so the total page count is
//! known when footers are stamped. That is what lets every footer state a
//! correct "Page x of y".

use chrono::{DateTime, Utc};

// A4 with 20 mm margins.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;

/// Below this cursor height a new page starts before the next line.
pub const BOTTOM_THRESHOLD_MM: f32 = 25.0;

/// Approximate character budget for one wrapped body line of Helvetica at
/// 9.5 pt across the 170 mm text width. Coarse, but consistent with how the
/// writer sizes text; long lines wrap a touch early rather than overflow.
pub const BODY_WRAP_CHARS: usize = 95;

const TITLE_SIZE_PT: f32 = 16.0;
const META_SIZE_PT: f32 = 9.0;
const HEADING_SIZE_PT: f32 = 11.5;
const BODY_SIZE_PT: f32 = 9.5;

const BODY_LINE_MM: f32 = 4.5;
const HEADING_LEAD_MM: f32 = 8.0;
const HEADING_LINE_MM: f32 = 6.0;

/// Font role of a placed line; the writer maps roles to concrete fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Title,
    Meta,
    Heading,
    Body,
}

/// One line of text at an absolute position on a page.
#[derive(Debug, Clone)]
pub struct PlacedLine {
    pub text: String,
    pub role: FontRole,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
}

/// One laid-out page. Footers are not part of the layout; the writer stamps
/// them once the total count is known.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Title-block metadata for an export.
#[derive(Debug, Clone)]
pub struct ExportMeta {
    pub title: String,
    pub participant_name: Option<String>,
    pub report_type_label: String,
    pub generated_at: DateTime<Utc>,
}

/// A label/value pair for the single-shot tools that skip the section parser.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NamedField {
    pub label: String,
    pub value: String,
}

/// A heading/body block, the common currency of both export paths.
pub struct Block<'a> {
    pub heading: &'a str,
    pub body: &'a str,
}

/// Running layout cursor. Owns the page list and the vertical position.
struct Cursor {
    pages: Vec<PageLayout>,
    y_mm: f32,
}

impl Cursor {
    fn new() -> Self {
        Cursor {
            pages: vec![PageLayout::default()],
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn break_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    /// Starts a new page if fewer than `needed_mm` remain above the footer zone.
    fn ensure_room(&mut self, needed_mm: f32) {
        if self.y_mm - needed_mm < BOTTOM_THRESHOLD_MM {
            self.break_page();
        }
    }

    fn place(&mut self, text: &str, role: FontRole, size_pt: f32, advance_mm: f32) {
        self.ensure_room(advance_mm);
        self.y_mm -= advance_mm;
        let page = self.pages.last_mut().expect("cursor always has a page");
        page.lines.push(PlacedLine {
            text: text.to_string(),
            role,
            x_mm: MARGIN_MM,
            y_mm: self.y_mm,
            size_pt,
        });
    }

    fn gap(&mut self, mm: f32) {
        self.y_mm -= mm;
    }

    fn title_block(&mut self, meta: &ExportMeta) {
        self.place(&meta.title, FontRole::Title, TITLE_SIZE_PT, 8.0);
        if let Some(name) = &meta.participant_name {
            self.place(
                &format!("Participant: {name}"),
                FontRole::Meta,
                META_SIZE_PT,
                5.5,
            );
        }
        self.place(
            &format!(
                "{} — generated {}",
                meta.report_type_label,
                meta.generated_at.format("%d %B %Y")
            ),
            FontRole::Meta,
            META_SIZE_PT,
            5.5,
        );
        self.gap(6.0);
    }

    fn block(&mut self, block: &Block<'_>) {
        // Keep the heading attached to at least one body line.
        self.ensure_room(HEADING_LEAD_MM + HEADING_LINE_MM + BODY_LINE_MM);
        self.gap(HEADING_LEAD_MM);
        self.place(block.heading, FontRole::Heading, HEADING_SIZE_PT, HEADING_LINE_MM);

        for paragraph in block.body.split('\n') {
            if paragraph.trim().is_empty() {
                self.gap(BODY_LINE_MM * 0.6);
                continue;
            }
            for line in wrap_text(paragraph, BODY_WRAP_CHARS) {
                self.place(&line, FontRole::Body, BODY_SIZE_PT, BODY_LINE_MM);
            }
        }
    }
}

/// Lays out heading/body blocks under a title block.
pub fn paginate_blocks(blocks: &[Block<'_>], meta: &ExportMeta) -> Vec<PageLayout> {
    let mut cursor = Cursor::new();
    cursor.title_block(meta);
    for block in blocks {
        cursor.block(block);
    }
    cursor.pages
}

/// Lays out the named-field variant used by the single-shot tools.
pub fn paginate_fields(fields: &[NamedField], meta: &ExportMeta) -> Vec<PageLayout> {
    let blocks: Vec<Block<'_>> = fields
        .iter()
        .map(|f| Block {
            heading: &f.label,
            body: &f.value,
        })
        .collect();
    paginate_blocks(&blocks, meta)
}

/// Greedy word wrap against a character budget. Words longer than the
/// budget are hard-split so no line ever exceeds it.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                lines.push(chunk.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// The two fixed footer lines for page `page` of `total`.
pub fn footer_lines(page: usize, total: usize) -> (String, String) {
    (
        "Generated by the NDIS report toolkit — review before submission".to_string(),
        format!("Page {page} of {total}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ExportMeta {
        ExportMeta {
            title: "Support Coordination Report".to_string(),
            participant_name: Some("Alex Nguyen".to_string()),
            report_type_label: "Support Coordination Report".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_wrap_text_respects_budget() {
        let lines = wrap_text(&"word ".repeat(60), 40);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 40, "line over budget: {line}");
        }
    }

    #[test]
    fn test_wrap_text_hard_splits_oversized_words() {
        let lines = wrap_text(&"x".repeat(100), 40);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars().count(), 40);
        assert_eq!(lines[2].chars().count(), 20);
    }

    #[test]
    fn test_wrap_text_empty_input_yields_no_lines() {
        assert!(wrap_text("", 40).is_empty());
        assert!(wrap_text("   ", 40).is_empty());
    }

    #[test]
    fn test_short_report_fits_one_page() {
        let blocks = vec![Block {
            heading: "Executive Summary",
            body: "Progressing well.",
        }];
        let pages = paginate_blocks(&blocks, &meta());
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_long_report_paginates() {
        let body = "An evidence sentence that fills space on the page. ".repeat(120);
        let blocks: Vec<Block<'_>> = (0..6)
            .map(|_| Block {
                heading: "Progress Towards Goals",
                body: &body,
            })
            .collect();
        let pages = paginate_blocks(&blocks, &meta());
        assert!(pages.len() > 1, "expected multiple pages");
    }

    #[test]
    fn test_no_line_intrudes_into_footer_zone() {
        let body = "Line after line of report narrative text. ".repeat(200);
        let blocks = vec![Block {
            heading: "Plan Implementation",
            body: &body,
        }];
        for page in paginate_blocks(&blocks, &meta()) {
            for line in &page.lines {
                assert!(
                    line.y_mm >= BOTTOM_THRESHOLD_MM - f32::EPSILON,
                    "line placed at y={} inside footer zone",
                    line.y_mm
                );
            }
        }
    }

    #[test]
    fn test_every_page_has_content() {
        let body = "Narrative. ".repeat(600);
        let blocks = vec![Block {
            heading: "Background And Context",
            body: &body,
        }];
        for page in paginate_blocks(&blocks, &meta()) {
            assert!(!page.lines.is_empty(), "pagination produced an empty page");
        }
    }

    #[test]
    fn test_footer_numbers_are_strictly_increasing_and_consistent() {
        let total = 7;
        let mut last = 0;
        for page in 1..=total {
            let (_, numbering) = footer_lines(page, total);
            assert_eq!(numbering, format!("Page {page} of {total}"));
            assert!(page > last);
            last = page;
        }
    }

    #[test]
    fn test_fields_variant_renders_each_label() {
        let fields = vec![
            NamedField {
                label: "Summary".to_string(),
                value: "A concise summary.".to_string(),
            },
            NamedField {
                label: "Recommendations".to_string(),
                value: "Continue current supports.".to_string(),
            },
        ];
        let pages = paginate_fields(&fields, &meta());
        let all_text: Vec<&str> = pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|l| l.text.as_str()))
            .collect();
        assert!(all_text.contains(&"Summary"));
        assert!(all_text.contains(&"Recommendations"));
    }
}
