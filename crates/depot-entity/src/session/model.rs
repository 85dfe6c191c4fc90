//! In-memory session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One authenticated login.
///
/// Sessions live only in the process-wide session store, keyed by their
/// opaque token. The group set is a snapshot taken at login and is not
/// refreshed if the user's memberships change mid-session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated user.
    pub user_id: i64,
    /// Display name of the user at login time.
    pub username: String,
    /// Group memberships snapshotted at login.
    pub group_ids: Vec<i64>,
    /// Absolute expiry instant, fixed at creation.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is expired at the given instant.
    ///
    /// A session is valid strictly before its expiry and expired at or
    /// after it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
