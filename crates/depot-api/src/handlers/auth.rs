//! Auth handlers — login, logout, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;

use crate::dto::request::LoginRequest;
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::{CurrentSession, SESSION_COOKIE};
use crate::state::AppState;

/// GET /login
///
/// The login entry point that unauthenticated requests are redirected to.
pub async fn login_page() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Authentication required. POST username and password to /login."
    }))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    validate_request(&req)?;

    let user = state.credentials.verify(&req.username, &req.password).await?;

    let token = state
        .sessions
        .create(user.id, &user.username, user.group_ids.clone())?;

    info!(user_id = user.id, username = %user.username, "Login successful");

    let cookie = session_cookie(token, state.config.session.ttl_seconds());

    Ok((
        jar.add(cookie),
        Json(serde_json::json!({
            "success": true,
            "data": { "user_id": user.id, "username": user.username }
        })),
    ))
}

/// POST /logout
///
/// Idempotent: a missing or already-invalid cookie still yields a cleared
/// cookie and a success response.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.invalidate(cookie.value());
    }

    (
        jar.add(clearing_cookie()),
        Json(serde_json::json!({
            "success": true,
            "data": { "message": "Logged out" }
        })),
    )
}

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let is_admin = state.access.is_admin(&session).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "user_id": session.user_id,
            "username": session.username,
            "group_ids": session.group_ids,
            "expires_at": session.expires_at,
            "is_admin": is_admin,
        }
    })))
}

/// Builds the session cookie: HttpOnly, SameSite=Strict, whole-site path.
fn session_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

/// Builds the clearing cookie: empty value, negative max-age.
fn clearing_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(-1))
        .build()
}
