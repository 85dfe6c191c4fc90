//! Group-membership authorization.

use std::sync::Arc;

use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_database::repositories::group::GroupRepository;
use depot_entity::group::ADMIN_GROUP;
use depot_entity::session::Session;

/// Decides whether a session may touch a group's resources.
///
/// Membership is binary and non-hierarchical: no group nesting, no
/// deny-overrides, no per-resource exceptions. A session with access to a
/// group has unconditional access to every file that group owns.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Group repository, used only for the admin-name lookup.
    group_repo: Arc<GroupRepository>,
}

impl AccessPolicy {
    /// Creates a new access policy.
    pub fn new(group_repo: Arc<GroupRepository>) -> Self {
        Self { group_repo }
    }

    /// Whether the session's group snapshot contains `group_id`.
    ///
    /// Pure membership test over the in-memory snapshot; later changes to
    /// the user's live memberships are invisible until the next login.
    pub fn can_access_group(session: &Session, group_id: i64) -> bool {
        session.group_ids.contains(&group_id)
    }

    /// Whether the session holds membership in the group named `admins`.
    ///
    /// The session stores ids, not names, so this takes one trip through
    /// the group table. A group id that no longer resolves simply does not
    /// confer admin; it is not an error.
    pub async fn is_admin(&self, session: &Session) -> AppResult<bool> {
        let names = self.group_repo.names_for_ids(&session.group_ids).await?;
        Ok(names.iter().any(|name| name == ADMIN_GROUP))
    }

    /// Errors with `Authorization` unless the session holds admin
    /// privilege.
    pub async fn require_admin(&self, session: &Session) -> AppResult<()> {
        if self.is_admin(session).await? {
            Ok(())
        } else {
            Err(AppError::authorization("Admin privileges required"))
        }
    }
}
