//! # depot-api
//!
//! HTTP API layer for Depot: application state, the `session_id` cookie
//! contract, the `CurrentSession` extractor, handlers, and the router.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
