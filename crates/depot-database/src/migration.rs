//! Embedded schema migration.

use sqlx::SqlitePool;
use tracing::info;

use depot_core::error::{AppError, ErrorKind};

/// The relational schema.
///
/// Membership rows cascade with either side; files keep a plain foreign
/// key to their owning group so deletion order is enforced by the service
/// layer, not the database.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_groups (
    user_id INTEGER NOT NULL,
    group_id INTEGER NOT NULL,
    PRIMARY KEY (user_id, group_id),
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (group_id) REFERENCES groups(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    file_path TEXT NOT NULL,
    group_id INTEGER NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    FOREIGN KEY (group_id) REFERENCES groups(id)
);
"#;

/// Apply the schema, creating any missing tables.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Migration failed", e))?;

    info!("Database schema is up to date");
    Ok(())
}
