//! Repository for the `sensors` collection.

use async_trait::async_trait;
use pipesense_core::types::RecordId;

use crate::models::sensor::{CreateSensor, Sensor, UpdateSensor};
use crate::DbResult;

/// Provides CRUD operations for sensors.
#[async_trait]
pub trait SensorRepo: Send + Sync {
    /// Insert a new sensor under a freshly assigned id.
    async fn create(&self, input: &CreateSensor) -> DbResult<Sensor>;

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<Sensor>>;

    /// First sensor with the given serial number. Uniqueness is not enforced.
    async fn find_by_serial_number(&self, serial_number: &str) -> DbResult<Option<Sensor>>;

    async fn list(&self) -> DbResult<Vec<Sensor>>;

    /// Overwrite every mutable field. Returns `false` if no sensor matched.
    async fn update(&self, id: RecordId, input: &UpdateSensor) -> DbResult<bool>;

    /// Replace the device token. Returns `false` if no sensor matched.
    async fn set_token(&self, id: RecordId, token: &str) -> DbResult<bool>;

    /// Returns `true` if a sensor was removed.
    async fn delete(&self, id: RecordId) -> DbResult<bool>;
}
