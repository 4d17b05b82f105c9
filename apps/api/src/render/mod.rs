//! Report view-model: expand/collapse state, previews, copy-to-clipboard.
//!
//! Expansion is view state only and never persisted. The "copy full report"
//! path returns the gateway's original raw text, not a re-join of the
//! parsed sections, so the copied string is byte-identical to the response.

use serde::Serialize;

use crate::report::parser::Section;

/// Collapsed sections longer than this show a truncated preview.
pub const PREVIEW_CHARS: usize = 300;

/// One section plus its view state. All sections start expanded.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub heading_key: String,
    pub label: String,
    pub body_text: String,
    pub is_expanded: bool,
}

impl SectionView {
    fn from_section(section: Section) -> Self {
        SectionView {
            heading_key: section.heading_key,
            label: section.label,
            body_text: section.body_text,
            is_expanded: true,
        }
    }

    /// True when collapsing this section would hide text behind a preview.
    pub fn is_truncated(&self) -> bool {
        self.body_text.chars().count() > PREVIEW_CHARS
    }

    /// The body as it should render right now: full text when expanded,
    /// otherwise a char-boundary-safe prefix of at most `PREVIEW_CHARS`.
    pub fn display_body(&self) -> &str {
        if self.is_expanded || !self.is_truncated() {
            return &self.body_text;
        }
        let end = self
            .body_text
            .char_indices()
            .nth(PREVIEW_CHARS)
            .map(|(i, _)| i)
            .unwrap_or(self.body_text.len());
        &self.body_text[..end]
    }
}

/// The full rendered report: sections plus the untouched raw text.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub sections: Vec<SectionView>,
    raw_text: String,
}

impl ReportView {
    pub fn new(raw_text: String, sections: Vec<Section>) -> Self {
        ReportView {
            sections: sections.into_iter().map(SectionView::from_section).collect(),
            raw_text,
        }
    }

    /// Toggles one section's expansion independently of all others.
    /// Returns the new state, or `None` for an out-of-range index.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let section = self.sections.get_mut(index)?;
        section.is_expanded = !section.is_expanded;
        Some(section.is_expanded)
    }

    /// The exact raw text the gateway returned, for clipboard copy.
    pub fn copy_full_report(&self) -> &str {
        &self.raw_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::parser::parse;

    fn long_body() -> String {
        "An observation sentence that repeats. ".repeat(20)
    }

    fn make_view() -> ReportView {
        let raw = format!(
            "EXECUTIVE SUMMARY\n{}\nNEXT STEPS\nShort body.",
            long_body()
        );
        let sections = parse(&raw);
        ReportView::new(raw, sections)
    }

    #[test]
    fn test_all_sections_start_expanded() {
        let view = make_view();
        assert!(view.sections.iter().all(|s| s.is_expanded));
    }

    #[test]
    fn test_toggle_is_independent_per_section() {
        let mut view = make_view();
        assert_eq!(view.toggle(0), Some(false));
        assert!(!view.sections[0].is_expanded);
        assert!(view.sections[1].is_expanded, "other sections untouched");
        assert_eq!(view.toggle(0), Some(true));
    }

    #[test]
    fn test_toggle_out_of_range_is_none() {
        let mut view = make_view();
        assert_eq!(view.toggle(99), None);
    }

    #[test]
    fn test_collapsed_long_body_shows_preview_only() {
        let mut view = make_view();
        view.toggle(0);
        let shown = view.sections[0].display_body();
        assert_eq!(shown.chars().count(), PREVIEW_CHARS);
        assert!(view.sections[0].body_text.starts_with(shown));
    }

    #[test]
    fn test_collapsed_short_body_is_not_truncated() {
        let mut view = make_view();
        view.toggle(1);
        assert_eq!(view.sections[1].display_body(), "Short body.");
        assert!(!view.sections[1].is_truncated());
    }

    #[test]
    fn test_expanded_body_is_full_regardless_of_length() {
        let view = make_view();
        assert_eq!(view.sections[0].display_body(), view.sections[0].body_text);
    }

    #[test]
    fn test_preview_respects_multibyte_char_boundaries() {
        let body = "é".repeat(PREVIEW_CHARS + 50);
        let raw = format!("CONCLUSION\n{body}");
        let mut view = ReportView::new(raw.clone(), parse(&raw));
        view.toggle(0);
        // Slicing mid-char would panic; count proves we cut at a boundary.
        assert_eq!(view.sections[0].display_body().chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_copy_full_report_is_byte_identical_to_raw_text() {
        let raw = "EXECUTIVE SUMMARY\nBody.\n\ntrailing whitespace  \n".to_string();
        let mut view = ReportView::new(raw.clone(), parse(&raw));
        view.toggle(0); // collapse state must not affect the copy
        assert_eq!(view.copy_full_report().as_bytes(), raw.as_bytes());
    }
}
