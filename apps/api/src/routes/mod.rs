pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::editor::handlers as editor;
use crate::generation::handlers as generation;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/download",
            get(resumes::handle_download_resume),
        )
        // AI drafts
        .route(
            "/api/v1/ai/generate-resume",
            post(generation::handle_generate_resume),
        )
        // Editor API
        .route("/api/v1/editor/:resume_id/open", post(editor::handle_open))
        .route(
            "/api/v1/editor/sessions/:session_id",
            get(editor::handle_get_session)
                .patch(editor::handle_edit)
                .delete(editor::handle_close),
        )
        .route(
            "/api/v1/editor/sessions/:session_id/preview",
            get(editor::handle_preview),
        )
        .route(
            "/api/v1/editor/sessions/:session_id/save",
            post(editor::handle_save),
        )
        .route(
            "/api/v1/editor/sessions/:session_id/reload",
            post(editor::handle_reload),
        )
        .route(
            "/api/v1/editor/sessions/:session_id/export",
            post(editor::handle_export),
        )
        .with_state(state)
}
