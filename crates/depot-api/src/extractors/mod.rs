//! Request extractors.

pub mod auth;

pub use auth::{CurrentSession, LoginRedirect, SESSION_COOKIE};
