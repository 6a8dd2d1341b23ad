//! Signed access/refresh token issuance and verification.
//!
//! Both tokens are HS256 JWTs carrying the same [`Claims`] shape and differ
//! only in lifetime. They are signed with one process-wide secret.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pipesense_core::types::RecordId;
use serde::{Deserialize, Serialize};

use crate::config::{parse_or, ConfigError};

/// Secret used by earlier deployments when none was configured.
///
/// Only honoured when `JWT_ALLOW_INSECURE_DEFAULT=true`.
pub const INSECURE_DEFAULT_SECRET: &str = "your-secret-key";

/// Default access token expiry in hours.
const DEFAULT_ACCESS_EXPIRY_HOURS: i64 = 24;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// JWT claims embedded in both tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Hex object id of the user.
    pub user_id: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    pub access_token_expiry_hours: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT configuration through a variable lookup.
    ///
    /// | Env Var                      | Required | Default |
    /// |------------------------------|----------|---------|
    /// | `JWT_SECRET`                 | **yes**  | --      |
    /// | `JWT_ALLOW_INSECURE_DEFAULT` | no       | `false` |
    /// | `JWT_ACCESS_EXPIRY_HOURS`    | no       | `24`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`    | no       | `7`     |
    ///
    /// With `JWT_ALLOW_INSECURE_DEFAULT=true` a missing secret falls back to
    /// [`INSECURE_DEFAULT_SECRET`] and a warning is logged.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allow_insecure: bool = parse_or(lookup, "JWT_ALLOW_INSECURE_DEFAULT", false)?;

        let secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None if allow_insecure => {
                tracing::warn!(
                    "JWT_SECRET is not set; signing tokens with the built-in insecure secret. \
                     Anyone can forge tokens for this deployment."
                );
                INSECURE_DEFAULT_SECRET.to_string()
            }
            None => return Err(ConfigError::MissingEnvVar("JWT_SECRET")),
        };

        let access_token_expiry_hours =
            parse_or(lookup, "JWT_ACCESS_EXPIRY_HOURS", DEFAULT_ACCESS_EXPIRY_HOURS)?;
        let refresh_token_expiry_days =
            parse_or(lookup, "JWT_REFRESH_EXPIRY_DAYS", DEFAULT_REFRESH_EXPIRY_DAYS)?;

        Ok(Self {
            secret,
            access_token_expiry_hours,
            refresh_token_expiry_days,
        })
    }
}

/// A freshly signed access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the access token.
    pub expires_at: DateTime<Utc>,
}

/// Why a refresh token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, expired, or malformed claims.
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// The `user_id` claim is not an object id.
    #[error("invalid user id in token: {0:?}")]
    InvalidUserId(String),
}

fn sign(
    user_id: RecordId,
    exp: DateTime<Utc>,
    config: &JwtConfig,
) -> jsonwebtoken::errors::Result<String> {
    let claims = Claims {
        user_id: user_id.to_hex(),
        exp: exp.timestamp(),
    };
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Issue an access token and a refresh token for `user_id`.
pub fn issue_token_pair(
    user_id: RecordId,
    config: &JwtConfig,
) -> jsonwebtoken::errors::Result<TokenPair> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.access_token_expiry_hours);
    let refresh_expires_at = now + Duration::days(config.refresh_token_expiry_days);

    Ok(TokenPair {
        access_token: sign(user_id, expires_at, config)?,
        refresh_token: sign(user_id, refresh_expires_at, config)?,
        expires_at,
    })
}

/// Validate a refresh token and return the user it was issued to.
pub fn verify_refresh_token(token: &str, config: &JwtConfig) -> Result<RecordId, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    data.claims
        .user_id
        .parse()
        .map_err(|_| TokenError::InvalidUserId(data.claims.user_id))
}
