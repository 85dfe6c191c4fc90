//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user.
///
/// Group memberships live in a separate join table; the repository fills
/// `group_ids` after loading the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Identifiers of the groups this user belongs to.
    #[sqlx(skip)]
    #[serde(default)]
    pub group_ids: Vec<i64>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Initial group memberships (at least one).
    pub group_ids: Vec<i64>,
}

/// Data for updating an existing user.
///
/// The membership set replaces the previous one in full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// The user ID to update.
    pub id: i64,
    /// New username.
    pub username: String,
    /// New group membership set (at least one).
    pub group_ids: Vec<i64>,
}
