//! Depot Server — group-scoped file depot.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use depot_auth::access::AccessPolicy;
use depot_auth::credentials::CredentialVerifier;
use depot_auth::password::PasswordHasher;
use depot_auth::session::store::SessionStore;
use depot_auth::session::sweeper::SessionSweeper;
use depot_core::config::AppConfig;
use depot_core::config::auth::AuthConfig;
use depot_core::error::AppError;
use depot_database::repositories::file::FileRepository;
use depot_database::repositories::group::GroupRepository;
use depot_database::repositories::user::UserRepository;
use depot_entity::group::ADMIN_GROUP;
use depot_entity::user::CreateUser;
use depot_service::file::{DownloadService, FileService};
use depot_service::group::GroupService;
use depot_service::user::UserService;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Depot v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = depot_database::connection::create_pool(&config.database).await?;
    depot_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let group_repo = Arc::new(GroupRepository::new(db_pool.clone()));
    let file_repo = Arc::new(FileRepository::new(db_pool.clone()));

    // ── Step 3: Auth components ──────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let credentials = Arc::new(CredentialVerifier::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
    ));
    let access = Arc::new(AccessPolicy::new(Arc::clone(&group_repo)));
    let sessions = Arc::new(SessionStore::new(&config.session));

    // ── Step 4: First-run seeding ────────────────────────────────
    seed_initial_admin(&config.auth, &user_repo, &group_repo, &password_hasher).await?;

    // ── Step 5: Services ─────────────────────────────────────────
    let file_service = Arc::new(FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&access),
    ));
    let download_service = Arc::new(DownloadService::new(Arc::clone(&file_repo)));
    let group_service = Arc::new(GroupService::new(
        Arc::clone(&group_repo),
        Arc::clone(&access),
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&access),
    ));

    // ── Step 6: Shutdown channel + session sweeper ───────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = SessionSweeper::from_config(Arc::clone(&sessions), &config.session)
        .spawn(shutdown_rx.clone());
    tracing::info!(
        interval_minutes = config.session.sweep_interval_minutes,
        "Session sweeper started"
    );

    // ── Step 7: Build and start HTTP server ──────────────────────
    let app_state = depot_api::state::AppState {
        config: Arc::new(config.clone()),
        sessions: Arc::clone(&sessions),
        credentials,
        access,
        user_repo,
        group_repo,
        file_repo,
        file_service,
        download_service,
        group_service,
        user_service,
    };

    let app = depot_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Depot server listening on {addr}");

    // ── Step 8: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 9: Wait for the sweeper ─────────────────────────────
    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), sweeper_handle).await;

    tracing::info!("Depot server shut down gracefully");
    Ok(())
}

/// Seed the `admins` group and an initial admin account when the user
/// table is empty, so a fresh install is reachable.
async fn seed_initial_admin(
    auth_config: &AuthConfig,
    user_repo: &UserRepository,
    group_repo: &GroupRepository,
    hasher: &PasswordHasher,
) -> Result<(), AppError> {
    if user_repo.count().await? > 0 {
        return Ok(());
    }

    tracing::info!("User table is empty, seeding initial admin account");

    let admins = group_repo.create(ADMIN_GROUP).await?;
    let password_hash = hasher.hash_password(&auth_config.seed_admin_password)?;

    user_repo
        .create(&CreateUser {
            username: auth_config.seed_admin_username.clone(),
            password_hash,
            group_ids: vec![admins.id],
        })
        .await?;

    tracing::info!(
        username = %auth_config.seed_admin_username,
        "Seeded admin account; change its password after first login"
    );

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
