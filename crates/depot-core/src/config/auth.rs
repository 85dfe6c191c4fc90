//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Username seeded on first start when the user table is empty.
    #[serde(default = "default_seed_username")]
    pub seed_admin_username: String,
    /// Password for the seeded admin account. Change it after first login.
    #[serde(default = "default_seed_password")]
    pub seed_admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            seed_admin_username: default_seed_username(),
            seed_admin_password: default_seed_password(),
        }
    }
}

fn default_seed_username() -> String {
    "admin".to_string()
}

fn default_seed_password() -> String {
    "admin".to_string()
}
