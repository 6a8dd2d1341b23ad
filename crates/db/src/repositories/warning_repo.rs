//! Repository for the `warnings` collection.

use async_trait::async_trait;
use pipesense_core::types::RecordId;

use crate::models::warning::{CreateWarning, Warning};
use crate::DbResult;

/// Read access to warning levels, plus the bulk insert used for seeding.
#[async_trait]
pub trait WarningRepo: Send + Sync {
    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<Warning>>;

    async fn list(&self) -> DbResult<Vec<Warning>>;

    async fn count(&self) -> DbResult<u64>;

    async fn insert_many(&self, inputs: &[CreateWarning]) -> DbResult<Vec<Warning>>;
}
