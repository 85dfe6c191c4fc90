//! Group admin service.

use std::sync::Arc;

use tracing::info;

use depot_auth::access::AccessPolicy;
use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_database::repositories::group::GroupRepository;
use depot_entity::group::{Group, GroupOverview};
use depot_entity::session::Session;

/// Admin-gated group management.
#[derive(Debug, Clone)]
pub struct GroupService {
    /// Group repository.
    group_repo: Arc<GroupRepository>,
    /// Access policy for admin checks.
    access: Arc<AccessPolicy>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(group_repo: Arc<GroupRepository>, access: Arc<AccessPolicy>) -> Self {
        Self { group_repo, access }
    }

    /// Lists every group with its member and file counts. Admin only.
    pub async fn list_overview(&self, session: &Session) -> AppResult<Vec<GroupOverview>> {
        self.access.require_admin(session).await?;

        let groups = self.group_repo.find_all().await?;
        let mut overviews = Vec::with_capacity(groups.len());

        for group in groups {
            let member_count = self.group_repo.member_count(group.id).await?;
            let file_count = self.group_repo.file_count(group.id).await?;
            overviews.push(GroupOverview {
                group,
                member_count,
                file_count,
            });
        }

        Ok(overviews)
    }

    /// Creates a new group. Admin only.
    pub async fn create(&self, session: &Session, name: &str) -> AppResult<Group> {
        self.access.require_admin(session).await?;

        let group = self.group_repo.create(name).await?;
        info!(group_id = group.id, name = %group.name, "Group created");
        Ok(group)
    }

    /// Renames a group. Admin only.
    pub async fn update(&self, session: &Session, group_id: i64, name: &str) -> AppResult<()> {
        self.access.require_admin(session).await?;

        self.group_repo.update(group_id, name).await?;
        info!(group_id, name, "Group renamed");
        Ok(())
    }

    /// Deletes a group. Admin only.
    ///
    /// Refused while any file still belongs to the group; reassign or
    /// delete those files first. Membership rows cascade away with the
    /// group.
    pub async fn delete(&self, session: &Session, group_id: i64) -> AppResult<()> {
        self.access.require_admin(session).await?;

        let file_count = self.group_repo.file_count(group_id).await?;
        if file_count > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete a group that still has {file_count} file(s) assigned"
            )));
        }

        if !self.group_repo.delete(group_id).await? {
            return Err(AppError::not_found(format!("Group {group_id} not found")));
        }
        info!(group_id, "Group deleted");
        Ok(())
    }
}
