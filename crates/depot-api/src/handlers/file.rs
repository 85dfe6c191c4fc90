//! File listing and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use depot_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::state::AppState;

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let files = state.file_service.list_for_session(&session).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": files })))
}

/// GET /api/files/{id}/download
///
/// Streams the backing file without buffering it. Headers carry the
/// display name, never the stored path.
pub async fn download_file(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let download = state.download_service.fetch(&session, id).await?;

    let encoded_name = utf8_percent_encode(&download.name, NON_ALPHANUMERIC);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, download.size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename*=UTF-8''{encoded_name}"),
        )
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}
