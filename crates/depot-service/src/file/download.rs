//! File download service — the gateway between a session and the bytes on
//! disk.

use std::sync::Arc;

use tokio_util::io::ReaderStream;
use tracing::warn;

use depot_auth::access::AccessPolicy;
use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_database::repositories::file::FileRepository;
use depot_entity::session::Session;

/// Streams authorized file content to callers.
///
/// The only caller-supplied input is the opaque numeric file id; stored
/// paths are set exclusively through admin mutations, so path traversal is
/// ruled out by construction rather than by sanitization.
#[derive(Debug, Clone)]
pub struct DownloadService {
    /// File repository.
    file_repo: Arc<FileRepository>,
}

/// An authorized, open download ready to stream.
///
/// Dropping the value drops the underlying file handle, so the handle is
/// released on every exit path including caller disconnect.
#[derive(Debug)]
pub struct FileDownload {
    /// Display name, used for the suggested download filename. The stored
    /// path is never surfaced.
    pub name: String,
    /// Size of the backing file in bytes.
    pub size: u64,
    /// Sequential, single-pass stream over the file content.
    pub stream: ReaderStream<tokio::fs::File>,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(file_repo: Arc<FileRepository>) -> Self {
        Self { file_repo }
    }

    /// Resolves a file id, enforces group access, and opens the content.
    ///
    /// The authorization check runs before the filesystem is touched in
    /// any way. Unknown id ⇒ `NotFound`; wrong group ⇒ `Authorization`;
    /// unreadable backing file ⇒ `Storage` (logged with the path, which
    /// the caller-visible message never contains).
    pub async fn fetch(&self, session: &Session, file_id: i64) -> AppResult<FileDownload> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if !AccessPolicy::can_access_group(session, file.group_id) {
            return Err(AppError::authorization("You do not have access to this file"));
        }

        let handle = tokio::fs::File::open(&file.file_path).await.map_err(|e| {
            warn!(
                file_id = file.id,
                path = %file.file_path,
                error = %e,
                "Failed to open backing file"
            );
            AppError::storage("File is not accessible")
        })?;

        let metadata = handle.metadata().await.map_err(|e| {
            warn!(
                file_id = file.id,
                path = %file.file_path,
                error = %e,
                "Failed to stat backing file"
            );
            AppError::storage("File is not accessible")
        })?;

        Ok(FileDownload {
            name: file.name,
            size: metadata.len(),
            stream: ReaderStream::new(handle),
        })
    }
}
