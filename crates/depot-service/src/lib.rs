//! # depot-service
//!
//! Domain services for Depot. Every operation takes the resolved
//! [`Session`](depot_entity::session::Session) as an explicit argument
//! (there is no request-scoped ambient state), and admin-only operations
//! enforce the access policy before touching anything else.

pub mod file;
pub mod group;
pub mod user;
