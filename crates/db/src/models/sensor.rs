//! Sensor entity model and DTOs.

use pipesense_core::types::RecordId;
use serde::{Deserialize, Serialize};

/// Acquisition settings embedded in every sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub fmax: i64,
    pub lor: i64,
    pub g_max: i64,
    pub alarm_ths: i64,
}

/// A document from the `sensors` collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sensor {
    pub id: RecordId,
    /// Owning user. Not checked against `users` on write.
    pub user_id: RecordId,
    pub serial_number: String,
    pub location: String,
    pub picture: String,
    pub config: SensorConfig,
    /// Device bearer token, set by the register action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// DTO for creating a new sensor. Missing fields bind to their zero value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSensor {
    pub user_id: RecordId,
    pub serial_number: String,
    pub location: String,
    pub picture: String,
    pub config: SensorConfig,
    /// Never taken from the request body; batch registration fills it in.
    #[serde(skip_deserializing)]
    pub token: Option<String>,
}

/// Full overwrite of a sensor's mutable fields. The token is left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSensor {
    pub user_id: RecordId,
    pub serial_number: String,
    pub location: String,
    pub picture: String,
    pub config: SensorConfig,
}

impl Sensor {
    /// Materialize a created sensor under its assigned id.
    pub fn from_create(id: RecordId, input: &CreateSensor) -> Self {
        Self {
            id,
            user_id: input.user_id,
            serial_number: input.serial_number.clone(),
            location: input.location.clone(),
            picture: input.picture.clone(),
            config: input.config,
            token: input.token.clone(),
        }
    }

    /// Apply a full-field overwrite in place.
    pub fn apply(&mut self, update: &UpdateSensor) {
        self.user_id = update.user_id;
        self.serial_number = update.serial_number.clone();
        self.location = update.location.clone();
        self.picture = update.picture.clone();
        self.config = update.config;
    }
}
