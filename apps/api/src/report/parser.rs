//! Section Parser — structures the LLM's raw response text.
//!
//! A single forward scan over the response lines, splitting on recognized
//! vocabulary headings. Deterministic and idempotent: the parsed sections
//! are a read-time view over `raw_text`, never a second source of truth.

use serde::Serialize;

use crate::report::headings::{
    match_heading, title_case, FULL_REPORT_KEY, FULL_REPORT_LABEL,
};

/// One (heading, body) pair in response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Canonical vocabulary entry, or `FULL_REPORT` for the fallback.
    pub heading_key: String,
    /// Title-cased display form of the key.
    pub label: String,
    pub body_text: String,
}

/// Splits raw response text into ordered sections.
///
/// A heading line closes the currently open section, which is emitted only
/// if its accumulated body is non-blank — a heading immediately followed by
/// another heading produces nothing for the first. If the whole scan finds
/// no section and the input is non-blank, the entire text becomes one
/// "Full Report" section, verbatim.
pub fn parse(raw_text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut open: Option<(&'static str, String)> = None;

    for line in raw_text.lines() {
        if let Some(key) = match_heading(line) {
            if let Some((prev_key, body)) = open.take() {
                push_if_non_blank(&mut sections, prev_key, body);
            }
            open = Some((key, String::new()));
        } else if let Some((_, body)) = open.as_mut() {
            body.push_str(line);
            body.push('\n');
        }
        // Lines before the first heading are dropped; the fallback below
        // covers responses with no headings at all.
    }

    if let Some((key, body)) = open.take() {
        push_if_non_blank(&mut sections, key, body);
    }

    if sections.is_empty() && !raw_text.trim().is_empty() {
        sections.push(Section {
            heading_key: FULL_REPORT_KEY.to_string(),
            label: FULL_REPORT_LABEL.to_string(),
            body_text: raw_text.to_string(),
        });
    }

    sections
}

fn push_if_non_blank(sections: &mut Vec<Section>, key: &'static str, body: String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return;
    }
    sections.push(Section {
        heading_key: key.to_string(),
        label: title_case(key),
        body_text: trimmed.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_section_report_parses_in_order() {
        let raw = "EXECUTIVE SUMMARY\nParticipant is progressing well.\n\n\
                   RISK ASSESSMENT AND MITIGATION\nNo risks identified.";
        let sections = parse(raw);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading_key, "EXECUTIVE SUMMARY");
        assert_eq!(sections[0].label, "Executive Summary");
        assert_eq!(sections[0].body_text, "Participant is progressing well.");
        assert_eq!(sections[1].heading_key, "RISK ASSESSMENT AND MITIGATION");
        assert_eq!(sections[1].body_text, "No risks identified.");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = "EXECUTIVE SUMMARY\nAll good.\n\nNEXT STEPS\nReview in May.\n";
        assert_eq!(parse(raw), parse(raw));
    }

    #[test]
    fn test_adjacent_headings_drop_the_empty_section() {
        let raw = "PARTICIPANT SUMMARY\nRISK ASSESSMENT AND MITIGATION\nSome body text";
        let sections = parse(raw);

        assert_eq!(sections.len(), 1, "empty first section must be dropped");
        assert_eq!(sections[0].heading_key, "RISK ASSESSMENT AND MITIGATION");
        assert_eq!(sections[0].body_text, "Some body text");
    }

    #[test]
    fn test_no_known_headings_falls_back_to_full_report() {
        let raw = "This response never uses a single vocabulary heading.\nJust prose.";
        let sections = parse(raw);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading_key, "FULL_REPORT");
        assert_eq!(sections[0].label, "Full Report");
        assert_eq!(sections[0].body_text, raw, "fallback body is verbatim input");
    }

    #[test]
    fn test_blank_input_yields_no_sections() {
        assert!(parse("").is_empty());
        assert!(parse("   \n \n").is_empty());
    }

    #[test]
    fn test_heading_with_colon_and_mixed_case() {
        let raw = "Executive Summary:\nGoing well.\n";
        let sections = parse(raw);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading_key, "EXECUTIVE SUMMARY");
    }

    #[test]
    fn test_repeated_heading_produces_separate_sections() {
        // A persona reusing a heading by mistake yields two same-keyed
        // sections, not one merged section.
        let raw = "NEXT STEPS\nFirst block.\n\nNEXT STEPS\nSecond block.\n";
        let sections = parse(raw);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading_key, "NEXT STEPS");
        assert_eq!(sections[1].heading_key, "NEXT STEPS");
        assert_eq!(sections[0].body_text, "First block.");
        assert_eq!(sections[1].body_text, "Second block.");
    }

    #[test]
    fn test_multi_line_body_keeps_interior_line_breaks() {
        let raw = "CONCLUSION\nLine one.\nLine two.\n\nLine four.";
        let sections = parse(raw);
        assert_eq!(sections[0].body_text, "Line one.\nLine two.\n\nLine four.");
    }
}
