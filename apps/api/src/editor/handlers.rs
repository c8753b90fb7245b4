//! Axum route handlers for the Editor API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Html,
    Json,
};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::editor::address::EditorAddress;
use crate::editor::form::EditCommand;
use crate::editor::session::EditorView;
use crate::errors::AppError;
use crate::export::ExportArtifact;
use crate::models::resume::Resume;
use crate::state::AppState;

/// POST /api/v1/editor/:resume_id/open
///
/// Opens a working copy of the resume. The query string becomes the editor
/// address; `download=true` triggers one export shortly after opening.
pub async fn handle_open(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<(StatusCode, Json<EditorView>), AppError> {
    let Query(params) = query?;
    let address = EditorAddress::new(resume_id, params);
    let view = state
        .editors
        .open(state.store.as_ref(), state.print.clone(), user_id, address)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/editor/sessions/:session_id
pub async fn handle_get_session(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<EditorView>, AppError> {
    Ok(Json(state.editors.view(user_id, session_id).await?))
}

/// PATCH /api/v1/editor/sessions/:session_id
///
/// Applies one edit command to the working copy and returns the new view.
pub async fn handle_edit(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<EditCommand>, JsonRejection>,
) -> Result<Json<EditorView>, AppError> {
    let Json(command) = payload?;
    Ok(Json(state.editors.apply(user_id, session_id, command).await?))
}

/// DELETE /api/v1/editor/sessions/:session_id
pub async fn handle_close(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.editors.close(user_id, session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/editor/sessions/:session_id/preview
pub async fn handle_preview(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.editors.preview_html(user_id, session_id).await?))
}

/// POST /api/v1/editor/sessions/:session_id/save
pub async fn handle_save(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    let resume = state
        .editors
        .save(state.store.as_ref(), user_id, session_id)
        .await?;
    Ok(Json(resume))
}

/// POST /api/v1/editor/sessions/:session_id/reload
///
/// Discards unsaved edits and reloads the persisted document.
pub async fn handle_reload(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<EditorView>, AppError> {
    let view = state
        .editors
        .reload(state.store.as_ref(), user_id, session_id)
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/editor/sessions/:session_id/export
pub async fn handle_export(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ExportArtifact>, AppError> {
    let artifact = state
        .editors
        .export(state.print.as_ref(), user_id, session_id)
        .await?;
    Ok(Json(artifact))
}
