//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest};
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let users = state.user_service.list(&session).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": users })))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate_request(&req)?;

    let user = state
        .user_service
        .create(&session, &req.username, &req.password, req.group_ids)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate_request(&req)?;

    state
        .user_service
        .update(&session, id, &req.username, req.group_ids)
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "User updated" } }),
    ))
}

/// PUT /api/admin/users/{id}/password
pub async fn change_password(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate_request(&req)?;

    state
        .user_service
        .change_password(&session, id, &req.password)
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Password updated" } }),
    ))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.user_service.delete(&session, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "User deleted" } }),
    ))
}
