//! Pipesense API server library.
//!
//! Exposes config, state, error handling, auth helpers and routes so the
//! binary entrypoint and integration tests share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
