//! User admin service.

use std::sync::Arc;

use tracing::info;

use depot_auth::access::AccessPolicy;
use depot_auth::password::PasswordHasher;
use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_database::repositories::user::UserRepository;
use depot_entity::session::Session;
use depot_entity::user::{CreateUser, UpdateUser, User};

/// Admin-gated user management.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Access policy for admin checks.
    access: Arc<AccessPolicy>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        access: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            access,
        }
    }

    /// Lists every user. Admin only.
    pub async fn list(&self, session: &Session) -> AppResult<Vec<User>> {
        self.access.require_admin(session).await?;
        self.user_repo.find_all().await
    }

    /// Creates a user with an initial membership set. Admin only.
    pub async fn create(
        &self,
        session: &Session,
        username: &str,
        password: &str,
        group_ids: Vec<i64>,
    ) -> AppResult<User> {
        self.access.require_admin(session).await?;

        if group_ids.is_empty() {
            return Err(AppError::validation(
                "User must belong to at least one group",
            ));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                password_hash,
                group_ids,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Updates a user's name and replaces their membership set. Admin only.
    pub async fn update(
        &self,
        session: &Session,
        user_id: i64,
        username: &str,
        group_ids: Vec<i64>,
    ) -> AppResult<()> {
        self.access.require_admin(session).await?;

        if group_ids.is_empty() {
            return Err(AppError::validation(
                "User must belong to at least one group",
            ));
        }

        self.user_repo
            .update(&UpdateUser {
                id: user_id,
                username: username.to_string(),
                group_ids,
            })
            .await?;

        info!(user_id, "User updated");
        Ok(())
    }

    /// Replaces a user's password. Admin only.
    pub async fn change_password(
        &self,
        session: &Session,
        user_id: i64,
        password: &str,
    ) -> AppResult<()> {
        self.access.require_admin(session).await?;

        let password_hash = self.hasher.hash_password(password)?;
        self.user_repo.update_password(user_id, &password_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Deletes a user. Admin only.
    ///
    /// Admins cannot delete their own account; the conflict leaves the
    /// account untouched.
    pub async fn delete(&self, session: &Session, user_id: i64) -> AppResult<()> {
        self.access.require_admin(session).await?;

        if session.user_id == user_id {
            return Err(AppError::conflict("You cannot delete your own account"));
        }

        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        info!(user_id, "User deleted");
        Ok(())
    }
}
