//! Admin file management handlers.

use axum::Json;
use axum::extract::{Path, State};

use depot_entity::file::{CreateFile, UpdateFile};

use crate::dto::request::{CreateFileRequest, UpdateFileRequest};
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::state::AppState;

/// GET /api/admin/files
pub async fn list_files(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let files = state.file_service.list_all(&session).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": files })))
}

/// POST /api/admin/files
pub async fn create_file(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(req): Json<CreateFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate_request(&req)?;

    let file = state
        .file_service
        .create(
            &session,
            CreateFile {
                name: req.name,
                file_path: req.file_path,
                group_id: req.group_id,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": file })))
}

/// PUT /api/admin/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Json(req): Json<UpdateFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate_request(&req)?;

    state
        .file_service
        .update(
            &session,
            UpdateFile {
                id,
                name: req.name,
                file_path: req.file_path,
                group_id: req.group_id,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "File updated" } }),
    ))
}

/// DELETE /api/admin/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.file_service.delete(&session, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "File deleted" } }),
    ))
}
