//! The fixed report-heading vocabulary.
//!
//! This is a contract shared by two sides that must never drift apart:
//! the persona registry instructs the LLM to emit exactly these heading
//! strings, and the section parser matches returned lines against the same
//! set. Both sides import from here and nowhere else.

/// Sentinel heading key used when a response contains no recognized heading.
pub const FULL_REPORT_KEY: &str = "FULL_REPORT";

/// Label shown for the fallback section.
pub const FULL_REPORT_LABEL: &str = "Full Report";

/// Every heading the LLM may emit, uppercase, in no significant order.
/// A line in a response is a section boundary iff (trimmed, uppercased) it
/// equals one of these entries or starts with one followed by a colon.
pub const HEADING_VOCABULARY: &[&str] = &[
    "EXECUTIVE SUMMARY",
    "PARTICIPANT SUMMARY",
    "PARTICIPANT PROFILE",
    "BACKGROUND AND CONTEXT",
    "PRESENTING NEEDS",
    "FUNCTIONAL ASSESSMENT",
    "ASSESSMENT FINDINGS",
    "CLINICAL OBSERVATIONS",
    "CURRENT SUPPORTS",
    "INFORMAL SUPPORTS",
    "FORMAL SUPPORTS",
    "MAINSTREAM AND COMMUNITY SUPPORTS",
    "SUPPORT COORDINATION ACTIVITIES",
    "COORDINATION OF SUPPORTS",
    "PLAN IMPLEMENTATION",
    "BUDGET OVERVIEW",
    "FUNDING UTILISATION",
    "CORE SUPPORTS",
    "CAPACITY BUILDING SUPPORTS",
    "CAPITAL SUPPORTS",
    "GOALS AND ASPIRATIONS",
    "PROGRESS TOWARDS GOALS",
    "BARRIERS AND CHALLENGES",
    "RISK ASSESSMENT AND MITIGATION",
    "SAFEGUARDING CONSIDERATIONS",
    "HEALTH AND WELLBEING",
    "THERAPY OUTCOMES",
    "INTERVENTIONS PROVIDED",
    "RECOVERY GOALS",
    "PSYCHOSOCIAL SUPPORTS",
    "HOUSING AND LIVING SITUATION",
    "COMMUNITY PARTICIPATION",
    "CARER AND FAMILY CONTEXT",
    "SERVICE PROVIDER ENGAGEMENT",
    "RECOMMENDATIONS",
    "RECOMMENDATIONS FOR FUTURE SUPPORTS",
    "NEXT STEPS",
    "ACTION PLAN",
    "PLAN REVIEW READINESS",
    "CONCLUSION",
];

/// Matches one line against the vocabulary.
///
/// Returns the canonical heading key if the trimmed, uppercased line exactly
/// equals a vocabulary entry, or equals an entry followed by a colon and
/// anything after it.
pub fn match_heading(line: &str) -> Option<&'static str> {
    let candidate = line.trim().to_uppercase();
    if candidate.is_empty() {
        return None;
    }

    HEADING_VOCABULARY.iter().copied().find(|&entry| {
        candidate == entry
            || candidate
                .strip_prefix(entry)
                .is_some_and(|rest| rest.starts_with(':'))
    })
}

/// Converts a heading key to its human-facing label: each word gets a
/// capital first letter and lowercase rest, original spacing preserved.
pub fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_word_start = true;
    for ch in key.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// The block appended to every persona's system prompt instructing the LLM
/// to structure its output with vocabulary headings only.
pub fn heading_instruction_block() -> String {
    let mut block = String::from(
        "STRUCTURE REQUIREMENTS:\n\
         Organise the report under section headings. Each heading MUST be on \
         its own line, in UPPERCASE, copied verbatim from this list — do not \
         invent, reword, or re-case headings:\n",
    );
    for heading in HEADING_VOCABULARY {
        block.push_str("- ");
        block.push_str(heading);
        block.push('\n');
    }
    block.push_str(
        "Use only the headings relevant to this report type. Never place body \
         text on the same line as a heading.",
    );
    block
}
