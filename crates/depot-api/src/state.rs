//! Application state shared across all handlers.

use std::sync::Arc;

use depot_auth::access::AccessPolicy;
use depot_auth::credentials::CredentialVerifier;
use depot_auth::session::store::SessionStore;
use depot_core::config::AppConfig;
use depot_database::repositories::file::FileRepository;
use depot_database::repositories::group::GroupRepository;
use depot_database::repositories::user::UserRepository;
use depot_service::file::{DownloadService, FileService};
use depot_service::group::GroupService;
use depot_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; the session store in
/// particular is constructed once at startup, torn down at shutdown, and
/// injected here rather than living in ambient global state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// The process-wide session store.
    pub sessions: Arc<SessionStore>,
    /// Credential verifier.
    pub credentials: Arc<CredentialVerifier>,
    /// Group-membership access policy.
    pub access: Arc<AccessPolicy>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository.
    pub user_repo: Arc<UserRepository>,
    /// Group repository.
    pub group_repo: Arc<GroupRepository>,
    /// File repository.
    pub file_repo: Arc<FileRepository>,

    // ── Services ─────────────────────────────────────────────
    /// File listing and admin mutation.
    pub file_service: Arc<FileService>,
    /// File download gateway.
    pub download_service: Arc<DownloadService>,
    /// Group administration.
    pub group_service: Arc<GroupService>,
    /// User administration.
    pub user_service: Arc<UserService>,
}
