//! Process-wide in-memory session store.

use std::collections::HashMap;
use std::sync::RwLock;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::TryRngCore;
use rand::rngs::OsRng;

use depot_core::config::session::SessionConfig;
use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_entity::session::Session;

/// Number of random bytes in a session token (256 bits).
const TOKEN_BYTES: usize = 32;

/// The process-wide registry of live sessions, keyed by opaque token.
///
/// The store is the exclusive owner of every [`Session`]; callers receive
/// cloned snapshots, never references into the map. Constructed once at
/// startup and injected wherever it is needed; there is no ambient global.
///
/// Concurrency: resolutions share a read lock; creation, invalidation, and
/// sweep eviction take the write lock exclusively. Critical sections are
/// synchronous and never span I/O.
#[derive(Debug)]
pub struct SessionStore {
    /// Fixed session lifetime, applied at creation.
    ttl: Duration,
    /// Token → session map.
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Creates an empty session store with the configured lifetime.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            ttl: Duration::hours(config.ttl_hours as i64),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Mints a session for an authenticated user and returns its token.
    ///
    /// The token is 256 bits from the OS CSPRNG, base64url-encoded. The
    /// expiry is fixed here and never renewed. Failure of the random
    /// source is fatal-class and is not retried.
    pub fn create(&self, user_id: i64, username: &str, group_ids: Vec<i64>) -> AppResult<String> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AppError::internal(format!("Random source unavailable: {e}")))?;

        let token = URL_SAFE_NO_PAD.encode(bytes);

        let session = Session {
            user_id,
            username: username.to_string(),
            group_ids,
            expires_at: Utc::now() + self.ttl,
        };

        self.write().insert(token.clone(), session);

        Ok(token)
    }

    /// Resolves a token to its session snapshot.
    ///
    /// Returns `None` both for unknown tokens and for entries whose expiry
    /// has passed. Expired entries are left in place (passive expiry); the
    /// next sweep deletes them.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let sessions = self.read();
        let session = sessions.get(token)?;

        if session.is_expired(Utc::now()) {
            return None;
        }

        Some(session.clone())
    }

    /// Removes a session. Idempotent: absent tokens are a no-op.
    pub fn invalidate(&self, token: &str) {
        self.write().remove(token);
    }

    /// Evicts every session expired at `now` in one full-map scan.
    ///
    /// Returns the number of evicted sessions.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    /// Number of stored sessions, including expired entries not yet swept.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no sessions at all.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned lock only means some holder panicked mid-operation; the
    // map itself is still structurally sound, so recover it.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Session>> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
