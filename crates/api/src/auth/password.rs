//! Argon2id password hashing and verification.
//!
//! Hashes are stored in PHC string format, so the salt and cost parameters
//! travel with the hash. Cost parameters are the crate defaults.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
///
/// A stored hash that is not an Argon2 PHC string (bcrypt from older
/// deployments, or empty) never matches. `Err` is reserved for failures
/// inside the verifier itself.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is not a PHC string");
            return Ok(false);
        }
    };
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password | argon2::password_hash::Error::Algorithm) => {
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
