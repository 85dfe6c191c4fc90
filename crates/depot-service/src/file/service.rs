//! File listing and admin mutation.

use std::sync::Arc;

use tracing::info;

use depot_auth::access::AccessPolicy;
use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_database::repositories::file::FileRepository;
use depot_entity::file::{CreateFile, File, UpdateFile};
use depot_entity::session::Session;

/// File queries and admin-gated file mutations.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Access policy for admin checks.
    access: Arc<AccessPolicy>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(file_repo: Arc<FileRepository>, access: Arc<AccessPolicy>) -> Self {
        Self { file_repo, access }
    }

    /// Lists the files visible to the session's group snapshot.
    pub async fn list_for_session(&self, session: &Session) -> AppResult<Vec<File>> {
        self.file_repo.find_by_group_ids(&session.group_ids).await
    }

    /// Lists every registered file. Admin only.
    pub async fn list_all(&self, session: &Session) -> AppResult<Vec<File>> {
        self.access.require_admin(session).await?;
        self.file_repo.find_all().await
    }

    /// Registers a new file. Admin only.
    pub async fn create(&self, session: &Session, data: CreateFile) -> AppResult<File> {
        self.access.require_admin(session).await?;

        let file = self.file_repo.create(&data).await?;
        info!(file_id = file.id, group_id = file.group_id, "File registered");
        Ok(file)
    }

    /// Updates a file's metadata or owning group. Admin only.
    pub async fn update(&self, session: &Session, data: UpdateFile) -> AppResult<()> {
        self.access.require_admin(session).await?;

        self.file_repo.update(&data).await?;
        info!(file_id = data.id, "File updated");
        Ok(())
    }

    /// Removes a file record. Admin only.
    pub async fn delete(&self, session: &Session, file_id: i64) -> AppResult<()> {
        self.access.require_admin(session).await?;

        if !self.file_repo.delete(file_id).await? {
            return Err(AppError::not_found(format!("File {file_id} not found")));
        }
        info!(file_id, "File deleted");
        Ok(())
    }
}
