//! Persona Registry — the fixed catalog of report personas.
//!
//! Configuration data, not runtime state: five entries defined at compile
//! time, stable order, no mutation operations. Each persona carries the
//! long-form instruction template sent as the system prompt, plus the
//! human-facing card shown in the persona selector.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::headings::heading_instruction_block;

pub mod prompts;

/// Closed id space: exactly five personas exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonaId {
    SupportCoordinator,
    SpecialistSupportCoordinator,
    RecoveryCoach,
    OccupationalTherapist,
    ProgressReport,
}

impl PersonaId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::SupportCoordinator => "support-coordinator",
            PersonaId::SpecialistSupportCoordinator => "specialist-support-coordinator",
            PersonaId::RecoveryCoach => "recovery-coach",
            PersonaId::OccupationalTherapist => "occupational-therapist",
            PersonaId::ProgressReport => "progress-report",
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown persona id: {0}")]
pub struct UnknownPersona(pub String);

impl std::str::FromStr for PersonaId {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "support-coordinator" => Ok(PersonaId::SupportCoordinator),
            "specialist-support-coordinator" => Ok(PersonaId::SpecialistSupportCoordinator),
            "recovery-coach" => Ok(PersonaId::RecoveryCoach),
            "occupational-therapist" => Ok(PersonaId::OccupationalTherapist),
            "progress-report" => Ok(PersonaId::ProgressReport),
            other => Err(UnknownPersona(other.to_string())),
        }
    }
}

/// One persona card plus its instruction template. Immutable.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaConfig {
    pub id: PersonaId,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub long_description: &'static str,
    /// UI accent colour tag for the selector card.
    pub color_tag: &'static str,
    /// Label used in PDF headers and history titles.
    pub report_type_label: &'static str,
    #[serde(skip)]
    pub instruction_template: &'static str,
}

/// The five personas, in selector display order.
const PERSONAS: &[PersonaConfig] = &[
    PersonaConfig {
        id: PersonaId::SupportCoordinator,
        title: "Support Coordinator",
        subtitle: "Level 2 — Coordination of Supports",
        long_description: "Comprehensive support coordination report covering plan \
            implementation, provider engagement, budget utilisation, goal progress \
            and recommendations for the next plan period.",
        color_tag: "blue",
        report_type_label: "Support Coordination Report",
        instruction_template: prompts::SUPPORT_COORDINATOR_TEMPLATE,
    },
    PersonaConfig {
        id: PersonaId::SpecialistSupportCoordinator,
        title: "Specialist Support Coordinator",
        subtitle: "Level 3 — Complex Needs",
        long_description: "Specialist report for participants with complex needs and \
            multi-system involvement, with detailed risk assessment, mitigation and \
            sustainability analysis.",
        color_tag: "purple",
        report_type_label: "Specialist Support Coordination Report",
        instruction_template: prompts::SPECIALIST_COORDINATOR_TEMPLATE,
    },
    PersonaConfig {
        id: PersonaId::RecoveryCoach,
        title: "Recovery Coach",
        subtitle: "Psychosocial Recovery Coaching",
        long_description: "Recovery-oriented progress report for participants with \
            psychosocial disability: recovery goals, engagement patterns, capacity \
            built and coordination with clinical services.",
        color_tag: "green",
        report_type_label: "Recovery Coaching Report",
        instruction_template: prompts::RECOVERY_COACH_TEMPLATE,
    },
    PersonaConfig {
        id: PersonaId::OccupationalTherapist,
        title: "Occupational Therapist",
        subtitle: "Functional Capacity & Therapy Progress",
        long_description: "Clinical functional report across self-care, mobility, \
            communication and self-management domains, with intervention outcomes \
            and evidence-linked recommendations.",
        color_tag: "orange",
        report_type_label: "Occupational Therapy Report",
        instruction_template: prompts::OCCUPATIONAL_THERAPIST_TEMPLATE,
    },
    PersonaConfig {
        id: PersonaId::ProgressReport,
        title: "Progress Report",
        subtitle: "General Periodic Progress",
        long_description: "General-purpose periodic progress report: goal-by-goal \
            progress, service delivery record, barriers and next steps for plan \
            review evidence.",
        color_tag: "teal",
        report_type_label: "Progress Report",
        instruction_template: prompts::PROGRESS_REPORT_TEMPLATE,
    },
];

/// Returns the five personas in stable selector order.
pub fn all() -> &'static [PersonaConfig] {
    PERSONAS
}

/// Looks up one persona. The id space is closed, so this cannot fail for
/// ids that came through `PersonaId` deserialization.
pub fn get(id: PersonaId) -> &'static PersonaConfig {
    PERSONAS
        .iter()
        .find(|p| p.id == id)
        .expect("PERSONAS covers every PersonaId variant")
}

/// Builds the full system prompt for a persona: its instruction template
/// plus the shared heading-emission block. Keeping the heading list out of
/// the templates themselves means the prompts and the section parser can
/// never drift independently.
pub fn system_prompt(id: PersonaId) -> String {
    format!(
        "{}\n\n{}",
        get(id).instruction_template,
        heading_instruction_block()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_registry_has_five_personas_in_stable_order() {
        let personas = all();
        assert_eq!(personas.len(), 5);
        assert_eq!(personas[0].id, PersonaId::SupportCoordinator);
        assert_eq!(personas[4].id, PersonaId::ProgressReport);
    }

    #[test]
    fn test_get_covers_every_variant() {
        for persona in all() {
            assert_eq!(get(persona.id).id, persona.id);
        }
    }

    #[test]
    fn test_persona_id_round_trips_through_str() {
        for persona in all() {
            let parsed = PersonaId::from_str(persona.id.as_str()).unwrap();
            assert_eq!(parsed, persona.id);
        }
    }

    #[test]
    fn test_unknown_persona_id_is_rejected() {
        assert!(PersonaId::from_str("physiotherapist").is_err());
    }

    #[test]
    fn test_system_prompt_contains_template_and_headings() {
        let prompt = system_prompt(PersonaId::RecoveryCoach);
        assert!(prompt.contains("Recovery Coach") || prompt.contains("recovery"));
        assert!(prompt.contains("EXECUTIVE SUMMARY"));
        assert!(prompt.contains("RISK ASSESSMENT AND MITIGATION"));
    }

    #[test]
    fn test_templates_demand_long_form_output() {
        for persona in all() {
            assert!(
                persona.instruction_template.contains("4,000")
                    || persona.instruction_template.contains("5,000"),
                "{} template missing length requirement",
                persona.id.as_str()
            );
        }
    }
}
