//! File repository implementation.

use sqlx::SqlitePool;

use depot_core::error::{AppError, ErrorKind};
use depot_core::result::AppResult;
use depot_entity::file::{CreateFile, File, UpdateFile};

/// Repository for file CRUD and query operations.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new file.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let result = sqlx::query(
            "INSERT INTO files (name, file_path, group_id, description) VALUES (?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.file_path)
        .bind(data.group_id)
        .bind(&data.description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))?;

        Ok(File {
            id: result.last_insert_rowid(),
            name: data.name.clone(),
            file_path: data.file_path.clone(),
            group_id: data.group_id,
            description: data.description.clone(),
        })
    }

    /// Find a file by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "SELECT id, name, file_path, group_id, description FROM files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List the files owned by any of the given groups, ordered by name.
    pub async fn find_by_group_ids(&self, group_ids: &[i64]) -> AppResult<Vec<File>> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
            "SELECT id, name, file_path, group_id, description FROM files WHERE group_id IN (",
        );
        let mut separated = query.separated(", ");
        for id in group_ids {
            separated.push_bind(id);
        }
        query.push(") ORDER BY name");

        query
            .build_query_as::<File>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list files by group", e)
            })
    }

    /// List all files ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT id, name, file_path, group_id, description FROM files ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Update a file's metadata and owning group.
    pub async fn update(&self, data: &UpdateFile) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE files SET name = ?, file_path = ?, group_id = ?, description = ? WHERE id = ?",
        )
        .bind(&data.name)
        .bind(&data.file_path)
        .bind(data.group_id)
        .bind(&data.description)
        .bind(data.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("File {} not found", data.id)));
        }
        Ok(())
    }

    /// Remove a file record.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;

        Ok(result.rows_affected() > 0)
    }
}
