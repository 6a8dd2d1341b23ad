//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed access/refresh token pairs.
//! - [`sensor_token`] -- opaque random tokens for sensor devices.

pub mod jwt;
pub mod password;
pub mod sensor_token;
