//! Synthesis orchestration: persona prompt → gateway call → parsed sections.

use chrono::{DateTime, Utc};

use crate::llm_client::{GatewayError, LlmClient};
use crate::personas::{self, PersonaId};
use crate::report::builder::SynthesisRequest;
use crate::report::parser::{parse, Section};

/// One successful synthesis. `sections` is always derived from `raw_text`
/// by the parser — re-parsing the same raw text yields the same sections.
#[derive(Debug, Clone)]
pub struct SynthesizedReport {
    pub raw_text: String,
    pub sections: Vec<Section>,
    pub persona_id: PersonaId,
    pub participant_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Runs one synthesis call end to end. No retry on failure: the error goes
/// back to the user, who re-triggers manually.
pub async fn synthesize(
    llm: &LlmClient,
    request: &SynthesisRequest,
    min_response_chars: usize,
) -> Result<SynthesizedReport, GatewayError> {
    let system = personas::system_prompt(request.persona_id);
    let user_message = request.user_message();

    let raw_text = llm
        .generate(&user_message, &system, min_response_chars)
        .await?;

    let sections = parse(&raw_text);

    Ok(SynthesizedReport {
        sections,
        persona_id: request.persona_id,
        participant_name: request.participant_name.clone(),
        created_at: Utc::now(),
        raw_text,
    })
}

/// Title stored with a history record: report type plus participant where known.
pub fn report_title(report: &SynthesizedReport) -> String {
    let label = personas::get(report.persona_id).report_type_label;
    match &report.participant_name {
        Some(name) => format!("{label} — {name}"),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_report(participant: Option<&str>) -> SynthesizedReport {
        SynthesizedReport {
            raw_text: String::new(),
            sections: vec![],
            persona_id: PersonaId::OccupationalTherapist,
            participant_name: participant.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_title_includes_participant_when_known() {
        let title = report_title(&make_report(Some("Alex Nguyen")));
        assert_eq!(title, "Occupational Therapy Report — Alex Nguyen");
    }

    #[test]
    fn test_report_title_without_participant() {
        let title = report_title(&make_report(None));
        assert_eq!(title, "Occupational Therapy Report");
    }
}
