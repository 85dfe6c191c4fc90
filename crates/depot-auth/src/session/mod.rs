//! Session lifecycle: token minting, resolution, invalidation, sweeping.

pub mod store;
pub mod sweeper;

pub use store::SessionStore;
pub use sweeper::SessionSweeper;
