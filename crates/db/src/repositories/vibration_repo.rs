//! Repository for the `vibrations` collection.

use async_trait::async_trait;
use pipesense_core::types::RecordId;

use crate::models::vibration::{
    CreateVibration, Page, UpdateVibration, VibrationData, VibrationFilter,
};
use crate::DbResult;

/// Provides CRUD and filtered listing for vibration readings.
#[async_trait]
pub trait VibrationRepo: Send + Sync {
    async fn create(&self, input: &CreateVibration) -> DbResult<VibrationData>;

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<VibrationData>>;

    /// Matching readings, newest timestamp first, windowed by `page`.
    async fn list(&self, filter: &VibrationFilter, page: Page) -> DbResult<Vec<VibrationData>>;

    /// Number of readings matching `filter`, ignoring pagination.
    async fn count(&self, filter: &VibrationFilter) -> DbResult<u64>;

    /// Overwrite every field except the id. Returns `false` if nothing matched.
    async fn update(&self, id: RecordId, input: &UpdateVibration) -> DbResult<bool>;

    async fn delete(&self, id: RecordId) -> DbResult<bool>;
}
