//! Repository traits over the four collections.
//!
//! Handlers only see these traits. [`crate::MongoStore`] backs them in
//! production and [`crate::MemoryStore`] in tests.

mod health;
mod sensor_repo;
mod user_repo;
mod vibration_repo;
mod warning_repo;

pub use health::HealthProbe;
pub use sensor_repo::SensorRepo;
pub use user_repo::UserRepo;
pub use vibration_repo::VibrationRepo;
pub use warning_repo::WarningRepo;
