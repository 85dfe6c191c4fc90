//! SQLite connection pool management.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use depot_core::config::DatabaseConfig;
use depot_core::error::{AppError, ErrorKind};

/// Create a new connection pool from configuration.
///
/// The database file is created if it does not exist, and foreign key
/// enforcement is switched on for every connection (SQLite defaults it
/// to off).
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, AppError> {
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Connecting to SQLite"
    );

    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid database URL: {e}"),
                e,
            )
        })?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to database: {e}"),
                e,
            )
        })?;

    info!("Successfully connected to SQLite");
    Ok(pool)
}

/// Check database connectivity.
pub async fn health_check(pool: &SqlitePool) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|v| v == 1)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
}
