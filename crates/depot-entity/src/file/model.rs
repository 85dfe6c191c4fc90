//! File entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A downloadable file registered with the depot.
///
/// The stored path points at the backing filesystem and is set only through
/// admin mutations, never derived from caller input at fetch time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: i64,
    /// Display name, used for the download filename.
    pub name: String,
    /// Path of the backing file on disk. Never exposed to callers.
    #[serde(skip_serializing)]
    pub file_path: String,
    /// The single group that owns this file.
    pub group_id: i64,
    /// Free-text description.
    pub description: String,
}

/// Data required to register a new file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Display name.
    pub name: String,
    /// Path of the backing file on disk.
    pub file_path: String,
    /// Owning group.
    pub group_id: i64,
    /// Free-text description.
    pub description: String,
}

/// Data for updating a registered file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFile {
    /// The file ID to update.
    pub id: i64,
    /// New display name.
    pub name: String,
    /// New backing path.
    pub file_path: String,
    /// New owning group.
    pub group_id: i64,
    /// New description.
    pub description: String,
}
