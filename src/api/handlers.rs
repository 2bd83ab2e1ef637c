//! One handler per operation in the catalogue. Handlers stay thin: decode,
//! call the store, map the result onto a status code.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;

use crate::error::Result;
use crate::models::{
    CreateNoteInput, CreateProjectInput, Project, ProjectNote, UpdateNoteInput,
    UpdateProjectInput,
};

use super::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "message": "projman record-management service is running" }))
}

// --- projects ---

pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> Result<(StatusCode, Json<Project>)> {
    let project = state.db.create_project(input)?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    Ok(Json(state.db.list_projects()?))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>> {
    Ok(Json(state.db.get_project(id)?))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateProjectInput>,
) -> Result<Json<Project>> {
    Ok(Json(state.db.update_project(id, update)?))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.db.delete_project(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- notes ---

pub async fn create_note(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(input): Json<CreateNoteInput>,
) -> Result<(StatusCode, Json<ProjectNote>)> {
    let note = state.db.create_note(project_id, input)?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn list_notes(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<ProjectNote>>> {
    Ok(Json(state.db.list_notes(project_id)?))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectNote>> {
    Ok(Json(state.db.get_note(id)?))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateNoteInput>,
) -> Result<Json<ProjectNote>> {
    Ok(Json(state.db.update_note(id, update)?))
}

pub async fn delete_note(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.db.delete_note(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- dataset lifecycle ---

/// Download the store as a raw SQLite file for offline analysis or backups.
pub async fn download_dataset(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let bytes = state.db.export_bytes()?;
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", state.db.file_name()),
        ),
    ];
    Ok((headers, bytes))
}

/// Same snapshot wrapped in JSON: `{"filename": "...", "data": "<base64>"}`.
pub async fn download_dataset_encoded(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    let bytes = state.db.export_bytes()?;
    Ok(Json(json!({
        "filename": state.db.file_name(),
        "data": BASE64.encode(bytes),
    })))
}

/// Irrevocably reset the store to its empty schema.
pub async fn purge_dataset(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    state.db.purge()?;
    Ok(Json(json!({ "detail": "database reset; all projects purged" })))
}
