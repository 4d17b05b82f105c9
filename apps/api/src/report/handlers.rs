use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{extract_all, DocumentResult, ExtractionPolicy, PendingFile, MAX_FILES};
use crate::history::{self, HistoryRecord};
use crate::pdf::{self, ExportMeta, NamedField};
use crate::personas::{self, PersonaConfig, PersonaId};
use crate::render::ReportView;
use crate::report::builder::{self, BuildError};
use crate::report::parser::parse;
use crate::report::synthesize::{report_title, synthesize};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/personas
pub async fn handle_list_personas() -> Json<&'static [PersonaConfig]> {
    Json(personas::all())
}

/// POST /api/v1/documents/extract
///
/// Pre-flight extraction so the UI can show per-file status while the user
/// is still composing a request. Files extract concurrently; each ends
/// `ready` or `error` on its own.
pub async fn handle_extract_documents(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<DocumentResult>>, AppError> {
    let form = read_synthesis_form(multipart).await?;
    let results = extract_all(form.files, extraction_policy(&state)).await;
    Ok(Json(results))
}

#[derive(Serialize)]
pub struct SynthesisResponse {
    pub report: ReportView,
    pub persona_id: PersonaId,
    pub participant_name: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Per-file extraction outcomes, in upload order.
    pub documents: Vec<DocumentResult>,
    pub history_id: Option<Uuid>,
    /// False when the best-effort history save failed; the report above is
    /// still complete and exportable.
    pub saved: bool,
}

/// POST /api/v1/reports
///
/// The full workflow: extract all files → build the combined text → one
/// gateway call → parse sections → best-effort history save.
pub async fn handle_synthesize(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SynthesisResponse>, AppError> {
    let form = read_synthesis_form(multipart).await?;

    let persona_id = form.persona_id()?;
    let user_id = form.user_id()?;

    // Every file reaches ready or error before the builder reads any text.
    let documents = extract_all(form.files, extraction_policy(&state)).await;

    let request = builder::build(
        &form.pasted_text,
        &documents,
        form.notes,
        persona_id,
        form.participant_name,
        form.ndis_number,
    )
    .map_err(|e: BuildError| AppError::Validation(e.to_string()))?;

    let report = synthesize(&state.llm, &request, state.config.min_response_chars)
        .await
        .map_err(|e| AppError::Gateway(e.to_string()))?;

    let history_id = history::save_best_effort(
        &state.db,
        user_id,
        &report_title(&report),
        report.persona_id.as_str(),
        report.participant_name.as_deref(),
        &report.raw_text,
        report.created_at,
    )
    .await;

    Ok(Json(SynthesisResponse {
        report: ReportView::new(report.raw_text, report.sections),
        persona_id: report.persona_id,
        participant_name: report.participant_name,
        created_at: report.created_at,
        documents,
        saved: history_id.is_some(),
        history_id,
    }))
}

/// GET /api/v1/reports/history
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<HistoryRecord>>, AppError> {
    let records = history::list_recent(&state.db, params.user_id).await?;
    Ok(Json(records))
}

/// DELETE /api/v1/reports/:id
pub async fn handle_delete_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let removed = history::delete(&state.db, params.user_id, id).await?;
    if !removed {
        return Err(AppError::NotFound(format!("Report {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct PdfExportRequest {
    pub raw_text: String,
    pub persona_id: PersonaId,
    pub participant_name: Option<String>,
}

/// POST /api/v1/reports/pdf
///
/// Re-parses the stored raw text (sections are always a derived view) and
/// streams the paginated PDF.
pub async fn handle_export_pdf(
    Json(req): Json<PdfExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let sections = parse(&req.raw_text);
    if sections.is_empty() {
        return Err(AppError::Validation("report text is empty".to_string()));
    }

    let label = personas::get(req.persona_id).report_type_label;
    let generated_at = Utc::now();
    let meta = ExportMeta {
        title: label.to_string(),
        participant_name: req.participant_name,
        report_type_label: label.to_string(),
        generated_at,
    };

    let bytes = pdf::export_sections(&sections, &meta).map_err(|e| AppError::Pdf(e.to_string()))?;
    Ok(pdf_response(bytes, &pdf::export_filename(label, generated_at)))
}

#[derive(Deserialize)]
pub struct ToolPdfRequest {
    pub tool_name: String,
    pub participant_name: Option<String>,
    pub fields: Vec<NamedField>,
}

/// POST /api/v1/tools/pdf
///
/// Named-field export for the single-shot tools that never go through the
/// section parser.
pub async fn handle_tool_pdf(
    Json(req): Json<ToolPdfRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.fields.is_empty() {
        return Err(AppError::Validation("no fields to export".to_string()));
    }

    let generated_at = Utc::now();
    let meta = ExportMeta {
        title: req.tool_name.clone(),
        participant_name: req.participant_name,
        report_type_label: req.tool_name.clone(),
        generated_at,
    };

    let bytes = pdf::export_fields(&req.fields, &meta).map_err(|e| AppError::Pdf(e.to_string()))?;
    Ok(pdf_response(
        bytes,
        &pdf::export_filename(&req.tool_name, generated_at),
    ))
}

fn pdf_response(bytes: Vec<u8>, filename: &str) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
}

fn extraction_policy(state: &AppState) -> ExtractionPolicy {
    ExtractionPolicy {
        docx_raw_fallback: state.config.docx_raw_fallback,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart form
// ────────────────────────────────────────────────────────────────────────────

/// Fields of the synthesis form, as received. Identifier parsing is
/// deferred so the extract-only endpoint can share this reader without
/// requiring persona or user fields.
#[derive(Default)]
struct SynthesisForm {
    pasted_text: String,
    notes: Option<String>,
    persona_id_raw: Option<String>,
    user_id_raw: Option<String>,
    participant_name: Option<String>,
    ndis_number: Option<String>,
    files: Vec<PendingFile>,
}

impl SynthesisForm {
    fn persona_id(&self) -> Result<PersonaId, AppError> {
        let raw = self
            .persona_id_raw
            .as_deref()
            .ok_or_else(|| AppError::Validation("persona_id is required".to_string()))?;
        PersonaId::from_str(raw).map_err(|e| AppError::Validation(e.to_string()))
    }

    fn user_id(&self) -> Result<Uuid, AppError> {
        let raw = self
            .user_id_raw
            .as_deref()
            .ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
        Uuid::parse_str(raw)
            .map_err(|_| AppError::Validation("user_id must be a valid UUID".to_string()))
    }
}

async fn read_synthesis_form(mut multipart: Multipart) -> Result<SynthesisForm, AppError> {
    let mut form = SynthesisForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed reading upload: {e}")))?;
                form.files.push(PendingFile {
                    name: file_name,
                    content_type,
                    bytes,
                });
                if form.files.len() > MAX_FILES {
                    return Err(AppError::Validation(format!(
                        "at most {MAX_FILES} files may be attached"
                    )));
                }
            }
            "pasted_text" => form.pasted_text = read_text(field).await?,
            "notes" => form.notes = Some(read_text(field).await?),
            "persona_id" => form.persona_id_raw = Some(read_text(field).await?),
            "user_id" => form.user_id_raw = Some(read_text(field).await?),
            "participant_name" => form.participant_name = Some(read_text(field).await?),
            "ndis_number" => form.ndis_number = Some(read_text(field).await?),
            // Unknown fields are ignored rather than rejected.
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("malformed form field: {e}")))
}
