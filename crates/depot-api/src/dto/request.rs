//! Request payload types.

use serde::Deserialize;
use validator::Validate;

/// POST /login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// POST /api/admin/files
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFileRequest {
    /// Display name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Backing path on disk.
    #[validate(length(min = 1, message = "file_path is required"))]
    pub file_path: String,
    /// Owning group.
    pub group_id: i64,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

/// PUT /api/admin/files/{id}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFileRequest {
    /// New display name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// New backing path.
    #[validate(length(min = 1, message = "file_path is required"))]
    pub file_path: String,
    /// New owning group.
    pub group_id: i64,
    /// New description.
    #[serde(default)]
    pub description: String,
}

/// POST /api/admin/users
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login name.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Plaintext password, hashed before storage.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// Initial memberships; users must belong to at least one group.
    #[validate(length(min = 1, message = "user must belong to at least one group"))]
    pub group_ids: Vec<i64>,
}

/// PUT /api/admin/users/{id}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New login name.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Replacement membership set; at least one group.
    #[validate(length(min = 1, message = "user must belong to at least one group"))]
    pub group_ids: Vec<i64>,
}

/// PUT /api/admin/users/{id}/password
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// New plaintext password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// POST /api/admin/groups
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    /// Group name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

/// PUT /api/admin/groups/{id}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    /// New group name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}
