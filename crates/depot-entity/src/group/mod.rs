//! Group entity.

pub mod model;

pub use model::{ADMIN_GROUP, Group, GroupOverview};
