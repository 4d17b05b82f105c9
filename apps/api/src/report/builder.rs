//! Synthesis Request Builder — assembles the combined text sent to the LLM.

use thiserror::Error;

use crate::extract::{DocStatus, DocumentResult, MAX_FILES};
use crate::personas::PersonaId;

/// Minimum combined-text size worth sending to the gateway. Anything
/// shorter cannot produce a grounded report.
pub const MIN_COMBINED_CHARS: usize = 50;

/// Everything the gateway needs for one synthesis call. Constructed fresh
/// per generate action and never persisted.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub combined_text: String,
    pub coordinator_notes: Option<String>,
    pub persona_id: PersonaId,
    pub participant_name: Option<String>,
    pub ndis_number: Option<String>,
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("combined text is {chars} characters; at least {MIN_COMBINED_CHARS} are required")]
    InsufficientContent { chars: usize },

    #[error("{count} files attached; at most {MAX_FILES} are allowed")]
    TooManyFiles { count: usize },
}

/// Builds the synthesis request from pasted text plus extracted documents.
///
/// Only `Ready` documents contribute; files still extracting or failed are
/// silently excluded (partial input is allowed). Each document's text is
/// preceded by a name banner so the LLM can attribute material to sources.
pub fn build(
    pasted_text: &str,
    documents: &[DocumentResult],
    coordinator_notes: Option<String>,
    persona_id: PersonaId,
    participant_name: Option<String>,
    ndis_number: Option<String>,
) -> Result<SynthesisRequest, BuildError> {
    if documents.len() > MAX_FILES {
        return Err(BuildError::TooManyFiles {
            count: documents.len(),
        });
    }

    let mut parts: Vec<String> = Vec::new();

    let pasted = pasted_text.trim();
    if !pasted.is_empty() {
        parts.push(pasted.to_string());
    }

    for doc in documents {
        if doc.status != DocStatus::Ready {
            continue;
        }
        parts.push(format!(
            "--- Document: {} ---\n{}",
            doc.name, doc.extracted_text
        ));
    }

    let combined_text = parts.join("\n\n");
    let chars = combined_text.chars().count();
    if chars < MIN_COMBINED_CHARS {
        return Err(BuildError::InsufficientContent { chars });
    }

    Ok(SynthesisRequest {
        combined_text,
        coordinator_notes: coordinator_notes.filter(|n| !n.trim().is_empty()),
        persona_id,
        participant_name: participant_name.filter(|n| !n.trim().is_empty()),
        ndis_number: ndis_number.filter(|n| !n.trim().is_empty()),
    })
}

impl SynthesisRequest {
    /// Formats the user-level message for the gateway call. The persona's
    /// instruction template travels separately as the system prompt.
    pub fn user_message(&self) -> String {
        let mut msg = String::new();

        if let Some(name) = &self.participant_name {
            msg.push_str(&format!("Participant name: {name}\n"));
        }
        if let Some(ndis) = &self.ndis_number {
            msg.push_str(&format!("NDIS number: {ndis}\n"));
        }
        if let Some(notes) = &self.coordinator_notes {
            msg.push_str(&format!("\nCoordinator notes:\n{notes}\n"));
        }

        msg.push_str("\nSource material:\n");
        msg.push_str(&self.combined_text);
        msg
    }
}
