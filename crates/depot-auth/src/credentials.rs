//! Credential verification against the persistent user store.

use std::sync::Arc;

use tracing::debug;

use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_database::repositories::user::UserRepository;
use depot_entity::user::User;

use crate::password::PasswordHasher;

/// Verifies a username/password pair against the stored salted hash.
///
/// Stateless: knows nothing about sessions. Unknown users and wrong
/// passwords produce the identical outcome so error content cannot be
/// used to enumerate accounts.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
}

impl CredentialVerifier {
    /// Creates a new credential verifier.
    pub fn new(user_repo: Arc<UserRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self { user_repo, hasher }
    }

    /// Verifies the pair and returns the user on success.
    ///
    /// Both failure paths collapse into one `Authentication` error with
    /// the same message.
    pub async fn verify(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.user_repo.find_by_username(username).await?;

        let Some(user) = user else {
            debug!(username, "Login attempt for unknown user");
            return Err(invalid_credentials());
        };

        let password_valid = self
            .hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            debug!(username, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }

        Ok(user)
    }
}

/// The single credential-failure outcome.
fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid username or password")
}
