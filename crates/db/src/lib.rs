//! Persistence gateway for sensors, users, vibration readings and warning levels.

pub mod memory;
pub mod models;
pub mod mongo;
pub mod repositories;
pub mod seed;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Collection names inside the configured database.
pub const SENSORS: &str = "sensors";
pub const USERS: &str = "users";
pub const VIBRATIONS: &str = "vibrations";
pub const WARNINGS: &str = "warnings";

/// Errors raised by the backing store.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

pub type DbResult<T> = Result<T, DbError>;
