//! `CurrentSession` extractor — resolves the session cookie and injects
//! the session snapshot into handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use depot_entity::session::Session;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_id";

/// Extracted session snapshot available in handlers.
///
/// Authorization-aware operations receive the session as an explicit
/// argument from here on; nothing downstream re-reads request state.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl std::ops::Deref for CurrentSession {
    type Target = Session;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection for missing, unknown, or expired session tokens.
///
/// Protected endpoints answer with a redirect to the login entry point
/// rather than a bare 401, matching the interactive-session contract.
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar.get(SESSION_COOKIE).ok_or(LoginRedirect)?;

        // Unknown and expired tokens look identical here: absent.
        let session = state.sessions.resolve(token.value()).ok_or(LoginRedirect)?;

        Ok(CurrentSession(session))
    }
}
