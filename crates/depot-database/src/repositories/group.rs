//! Group repository implementation.

use sqlx::SqlitePool;

use depot_core::error::{AppError, ErrorKind};
use depot_core::result::AppResult;
use depot_entity::group::Group;

/// Repository for group CRUD and query operations.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: SqlitePool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new group.
    pub async fn create(&self, name: &str) -> AppResult<Group> {
        let result = sqlx::query("INSERT INTO groups (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::conflict(format!("Group '{name}' already exists"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create group", e),
            })?;

        Ok(Group {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Find a group by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT id, name FROM groups WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    /// List all groups ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<Group>> {
        sqlx::query_as::<_, Group>("SELECT id, name FROM groups ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list groups", e))
    }

    /// Resolve a set of group ids to their names.
    ///
    /// Ids with no matching group are simply absent from the result.
    pub async fn names_for_ids(&self, ids: &[i64]) -> AppResult<Vec<String>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            sqlx::QueryBuilder::<sqlx::Sqlite>::new("SELECT name FROM groups WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        query.push(")");

        query
            .build_query_scalar::<String>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to resolve group names", e)
            })
    }

    /// Rename a group.
    pub async fn update(&self, id: i64, name: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE groups SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::conflict(format!("Group '{name}' already exists"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to update group", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Group {id} not found")));
        }
        Ok(())
    }

    /// Delete a group. Membership rows cascade; the service layer refuses
    /// the deletion while files still reference the group.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM groups WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete group", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count users holding membership in a group.
    pub async fn member_count(&self, id: i64) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_groups WHERE group_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count members", e))
    }

    /// Count files owned by a group.
    pub async fn file_count(&self, id: i64) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM files WHERE group_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))
    }
}
