//! Request handlers, one module per resource.
//!
//! Handlers talk to the repository traits held in [`crate::state::AppState`]
//! and map failures through [`crate::error::AppError`].

pub mod auth;
pub mod health;
pub mod sensor;
pub mod user;
pub mod vibration;
pub mod warning;
