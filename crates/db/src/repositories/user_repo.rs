//! Repository for the `users` collection.

use async_trait::async_trait;
use pipesense_core::types::RecordId;

use crate::models::user::{CreateUser, UpdateUser, User, UserTokens};
use crate::DbResult;

/// Provides CRUD operations for users.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, input: &CreateUser) -> DbResult<User>;

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<User>>;

    /// Find a user by username (case-sensitive).
    async fn find_by_username(&self, username: &str) -> DbResult<Option<User>>;

    async fn list(&self) -> DbResult<Vec<User>>;

    /// Returns `false` if no user matched.
    async fn update(&self, id: RecordId, input: &UpdateUser) -> DbResult<bool>;

    /// Persist a freshly issued token pair. Returns `false` if no user matched.
    async fn set_tokens(&self, id: RecordId, tokens: &UserTokens) -> DbResult<bool>;

    async fn delete(&self, id: RecordId) -> DbResult<bool>;
}
