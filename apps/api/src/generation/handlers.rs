//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use crate::auth::CurrentUser;
use crate::document::ResumeDocument;
use crate::errors::AppError;
use crate::generation::generator::{generate_draft, DraftRequest};
use crate::state::AppState;

/// POST /api/v1/ai/generate-resume
///
/// Produces a candidate document from the role description. The draft is not
/// persisted; the caller creates a resume from it if it wants to keep it.
pub async fn handle_generate_resume(
    CurrentUser(_user_id): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> Result<Json<ResumeDocument>, AppError> {
    let Json(request) = payload?;
    let generator = state
        .generator
        .as_deref()
        .ok_or_else(|| AppError::Generation("AI generation is not configured".to_string()))?;

    Ok(Json(generate_draft(generator, &request).await?))
}
