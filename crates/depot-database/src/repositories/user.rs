//! User repository implementation.

use sqlx::SqlitePool;

use depot_core::error::{AppError, ErrorKind};
use depot_core::result::AppResult;
use depot_entity::user::{CreateUser, UpdateUser, User};

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key, including their group memberships.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))?;

        match user {
            Some(mut user) => {
                user.group_ids = self.load_group_ids(user.id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Find a user by username, including their group memberships.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
        })?;

        match user {
            Some(mut user) => {
                user.group_ids = self.load_group_ids(user.id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// List all users ordered by username, with group memberships.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        for user in &mut users {
            user.group_ids = self.load_group_ids(user.id).await?;
        }

        Ok(users)
    }

    /// Create a new user together with their group memberships.
    ///
    /// The insert and the membership rows go into one transaction so a
    /// failure part-way leaves no user behind.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(&data.username)
            .bind(&data.password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::conflict(format!("Username '{}' already exists", data.username))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
            })?;

        let user_id = result.last_insert_rowid();

        for group_id in &data.group_ids {
            sqlx::query("INSERT INTO user_groups (user_id, group_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(group_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to assign group", e)
                })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit user", e))?;

        Ok(User {
            id: user_id,
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            group_ids: data.group_ids.clone(),
        })
    }

    /// Update a user's username and replace their membership set.
    ///
    /// Runs in one transaction: a crash mid-update can never leave the user
    /// with zero or duplicate memberships.
    pub async fn update(&self, data: &UpdateUser) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        let result = sqlx::query("UPDATE users SET username = ? WHERE id = ?")
            .bind(&data.username)
            .bind(data.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::conflict(format!("Username '{}' already exists", data.username))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to update user", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {} not found", data.id)));
        }

        sqlx::query("DELETE FROM user_groups WHERE user_id = ?")
            .bind(data.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear memberships", e)
            })?;

        for group_id in &data.group_ids {
            sqlx::query("INSERT INTO user_groups (user_id, group_id) VALUES (?, ?)")
                .bind(data.id)
                .bind(group_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to assign group", e)
                })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit user", e))
    }

    /// Replace a user's password hash.
    pub async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update password", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Delete a user. Membership rows cascade.
    pub async fn delete(&self, user_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count total users.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))
    }

    /// Load the group id set for a user.
    async fn load_group_ids(&self, user_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT group_id FROM user_groups WHERE user_id = ? ORDER BY group_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load memberships", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::run_migrations;
    use crate::repositories::group::GroupRepository;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    async fn test_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("parse sqlite url")
            .foreign_keys(true);

        // A single connection keeps every query on the same in-memory db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("connect in-memory sqlite");
        run_migrations(&pool).await.expect("run migrations");
        pool
    }

    #[tokio::test]
    async fn create_and_find_loads_memberships() {
        let pool = test_pool().await;
        let groups = GroupRepository::new(pool.clone());
        let users = UserRepository::new(pool);

        let g1 = groups.create("staff").await.unwrap();
        let g2 = groups.create("ops").await.unwrap();

        let created = users
            .create(&CreateUser {
                username: "alice".into(),
                password_hash: "hash".into(),
                group_ids: vec![g1.id, g2.id],
            })
            .await
            .unwrap();

        let found = users.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.group_ids, vec![g1.id, g2.id]);
    }

    #[tokio::test]
    async fn create_rolls_back_on_bad_membership() {
        let pool = test_pool().await;
        let users = UserRepository::new(pool);

        // Group 999 does not exist, so the membership insert violates the
        // foreign key and the whole transaction must roll back.
        let result = users
            .create(&CreateUser {
                username: "bob".into(),
                password_hash: "hash".into(),
                group_ids: vec![999],
            })
            .await;

        assert!(result.is_err());
        assert!(users.find_by_username("bob").await.unwrap().is_none());
        assert_eq!(users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let pool = test_pool().await;
        let groups = GroupRepository::new(pool.clone());
        let users = UserRepository::new(pool);

        let g = groups.create("staff").await.unwrap();
        let create = CreateUser {
            username: "carol".into(),
            password_hash: "hash".into(),
            group_ids: vec![g.id],
        };

        users.create(&create).await.unwrap();
        let err = users.create(&create).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn update_replaces_membership_set() {
        let pool = test_pool().await;
        let groups = GroupRepository::new(pool.clone());
        let users = UserRepository::new(pool);

        let g1 = groups.create("staff").await.unwrap();
        let g2 = groups.create("ops").await.unwrap();

        let user = users
            .create(&CreateUser {
                username: "dave".into(),
                password_hash: "hash".into(),
                group_ids: vec![g1.id],
            })
            .await
            .unwrap();

        users
            .update(&UpdateUser {
                id: user.id,
                username: "dave".into(),
                group_ids: vec![g2.id],
            })
            .await
            .unwrap();

        let found = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.group_ids, vec![g2.id]);
    }
}
