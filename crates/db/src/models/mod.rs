pub mod sensor;
pub mod user;
pub mod vibration;
pub mod warning;
