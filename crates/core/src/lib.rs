//! Types shared by the persistence and HTTP layers.

pub mod error;
pub mod types;
pub mod warning_levels;
