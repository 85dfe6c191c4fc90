//! Admin group management handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::{CreateGroupRequest, UpdateGroupRequest};
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::state::AppState;

/// GET /api/admin/groups
pub async fn list_groups(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let groups = state.group_service.list_overview(&session).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": groups })))
}

/// POST /api/admin/groups
pub async fn create_group(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate_request(&req)?;

    let group = state.group_service.create(&session, &req.name).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": group })))
}

/// PUT /api/admin/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate_request(&req)?;

    state.group_service.update(&session, id, &req.name).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Group updated" } }),
    ))
}

/// DELETE /api/admin/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.group_service.delete(&session, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Group deleted" } }),
    ))
}
