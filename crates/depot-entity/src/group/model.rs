//! Group entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The group name that grants elevated privilege.
///
/// Privilege is determined solely by current membership in this group;
/// there is no stored role flag.
pub const ADMIN_GROUP: &str = "admins";

/// A named authorization domain.
///
/// Files belong to exactly one group; users belong to zero or more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier.
    pub id: i64,
    /// Unique group name.
    pub name: String,
}

impl Group {
    /// Whether membership in this group confers admin privilege.
    pub fn grants_admin(&self) -> bool {
        self.name == ADMIN_GROUP
    }
}

/// A group together with its usage counts, for the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupOverview {
    /// The group itself.
    #[serde(flatten)]
    pub group: Group,
    /// Number of users holding membership.
    pub member_count: i64,
    /// Number of files owned by the group.
    pub file_count: i64,
}
