//! Route definitions for the Depot HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor. Protected routes rely on the `CurrentSession`
//! extractor, which redirects to `/login` when no valid session cookie is
//! presented.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(admin_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Login entry point, login, logout, session info.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", post(handlers::auth::logout))
        .route("/api/me", get(handlers::auth::me))
}

/// File listing and download.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/api/files", get(handlers::file::list_files))
        .route(
            "/api/files/{id}/download",
            get(handlers::file::download_file),
        )
}

/// Admin-only management endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        // File management
        .route(
            "/api/admin/files",
            get(handlers::admin::files::list_files).post(handlers::admin::files::create_file),
        )
        .route(
            "/api/admin/files/{id}",
            put(handlers::admin::files::update_file).delete(handlers::admin::files::delete_file),
        )
        // User management
        .route(
            "/api/admin/users",
            get(handlers::admin::users::list_users).post(handlers::admin::users::create_user),
        )
        .route(
            "/api/admin/users/{id}",
            put(handlers::admin::users::update_user).delete(handlers::admin::users::delete_user),
        )
        .route(
            "/api/admin/users/{id}/password",
            put(handlers::admin::users::change_password),
        )
        // Group management
        .route(
            "/api/admin/groups",
            get(handlers::admin::groups::list_groups).post(handlers::admin::groups::create_group),
        )
        .route(
            "/api/admin/groups/{id}",
            put(handlers::admin::groups::update_group)
                .delete(handlers::admin::groups::delete_group),
        )
}
