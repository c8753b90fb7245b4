//! Axum route handlers for the Resume API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::document::validation::{validate_document, validate_title};
use crate::document::ResumeDocument;
use crate::errors::AppError;
use crate::export::artifact_filename;
use crate::models::resume::Resume;
use crate::render::{render, to_html, Scale};
use crate::resumes::bridge;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub title: String,
    #[serde(default)]
    pub content: ResumeDocument,
    #[serde(default, alias = "isAiGenerated")]
    pub is_ai_generated: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResumeRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub content: ResumeDocument,
}

/// GET /api/v1/resumes
///
/// Lists the caller's resumes, most recently updated first.
pub async fn handle_list_resumes(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(bridge::list(state.store.as_ref(), user_id).await?))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateResumeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let Json(request) = payload?;
    validate_title(&request.title)?;
    validate_document(&request.content)?;

    let resume = bridge::create(
        state.store.as_ref(),
        user_id,
        request.title.trim().to_string(),
        request.content,
        request.is_ai_generated,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(
        bridge::load(state.store.as_ref(), user_id, resume_id).await?,
    ))
}

/// PUT /api/v1/resumes/:id
///
/// Replaces the whole document (and optionally the title). Last write wins.
pub async fn handle_update_resume(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    payload: Result<Json<UpdateResumeRequest>, JsonRejection>,
) -> Result<Json<Resume>, AppError> {
    let Json(request) = payload?;
    let title = request.title.as_deref().map(str::trim);
    if let Some(title) = title {
        validate_title(title)?;
    }
    validate_document(&request.content)?;

    let resume = bridge::save(
        state.store.as_ref(),
        user_id,
        resume_id,
        title,
        &request.content,
    )
    .await?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
///
/// Also closes any editor sessions still open on the resume.
pub async fn handle_delete_resume(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    bridge::delete(state.store.as_ref(), user_id, resume_id).await?;
    state.editors.close_for_resume(resume_id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id/download
///
/// Streams the full-scale print document of the persisted resume as an
/// attachment.
pub async fn handle_download_resume(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let resume = bridge::load(state.store.as_ref(), user_id, resume_id).await?;
    let html = to_html(&render(&resume.content), &resume.title, Scale::Full);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        artifact_filename(&resume.title)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        html,
    )
        .into_response())
}
