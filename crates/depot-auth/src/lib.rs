//! # depot-auth
//!
//! Authentication and authorization for Depot: Argon2id credential
//! verification, the process-wide in-memory session store with passive
//! expiry and active sweeping, and the group-membership access policy.

pub mod access;
pub mod credentials;
pub mod password;
pub mod session;

pub use access::AccessPolicy;
pub use credentials::CredentialVerifier;
pub use password::PasswordHasher;
pub use session::{SessionStore, SessionSweeper};
