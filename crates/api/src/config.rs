//! Server configuration loaded from environment variables.
//!
//! | Env Var                        | Required | Default                 |
//! |--------------------------------|----------|-------------------------|
//! | `HOST`                         | no       | `0.0.0.0`               |
//! | `PORT`                         | no       | `8080`                  |
//! | `CORS_ORIGINS`                 | no       | `http://localhost:5173` |
//! | `MONGODB_URI`                  | **yes**  | --                      |
//! | `MONGODB_DATABASE`             | no       | `vibration-sensor`      |
//! | `MONGODB_CONNECT_TIMEOUT_SECS` | no       | `10`                    |
//!
//! JWT settings are documented on [`JwtConfig::from_lookup`].

use std::str::FromStr;
use std::time::Duration;

use crate::auth::jwt::JwtConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_DATABASE: &str = "vibration-sensor";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("invalid value for {var}: {message}")]
    InvalidFormat { var: &'static str, message: String },
}

/// Connection settings for the document store.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Bounds connection setup and server selection at startup.
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let uri = lookup("MONGODB_URI").ok_or(ConfigError::MissingEnvVar("MONGODB_URI"))?;
        let database = lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.into());
        let timeout_secs = parse_or(
            &lookup,
            "MONGODB_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;

        let jwt = JwtConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            mongodb: MongoConfig {
                uri,
                database,
                connect_timeout: Duration::from_secs(timeout_secs),
            },
            jwt,
        })
    }
}

/// Parse `var` if set, otherwise fall back to `default`.
pub(crate) fn parse_or<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidFormat {
                var,
                message: e.to_string(),
            }),
        None => Ok(default),
    }
}
