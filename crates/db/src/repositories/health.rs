use async_trait::async_trait;

use crate::DbResult;

/// Liveness probe against the backing store.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> DbResult<()>;
}
