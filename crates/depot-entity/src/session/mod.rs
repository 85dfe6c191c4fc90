//! Session record.

pub mod model;

pub use model::Session;
