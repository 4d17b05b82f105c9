pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::report::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Persona catalog for the selector UI
        .route("/api/v1/personas", get(handlers::handle_list_personas))
        // Pre-flight per-file extraction status
        .route(
            "/api/v1/documents/extract",
            post(handlers::handle_extract_documents),
        )
        // Synthesis workflow
        .route("/api/v1/reports", post(handlers::handle_synthesize))
        .route("/api/v1/reports/history", get(handlers::handle_history))
        .route(
            "/api/v1/reports/:id",
            delete(handlers::handle_delete_report),
        )
        // PDF exports
        .route("/api/v1/reports/pdf", post(handlers::handle_export_pdf))
        .route("/api/v1/tools/pdf", post(handlers::handle_tool_pdf))
        .with_state(state)
}
