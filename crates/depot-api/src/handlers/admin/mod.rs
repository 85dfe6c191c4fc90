//! Admin-only handlers. Every operation requires membership in the
//! `admins` group, enforced by the services.

pub mod files;
pub mod groups;
pub mod users;
