//! User entity model and DTOs.

use pipesense_core::types::{RecordId, Timestamp};
use serde::Serialize;

/// Full user document from the `users` collection.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub organization: String,
    pub password_hash: String,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_expiry: Option<Timestamp>,
}

/// Safe user representation for API responses.
///
/// `password` is always serialized as the empty string; there is no way to
/// build one that carries the stored hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub organization: String,
    password: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<Timestamp>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            organization: user.organization,
            password: "",
            token: user.token,
            refresh_token: user.refresh_token,
            token_expiry: user.token_expiry,
        }
    }
}

/// DTO for creating a new user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub organization: String,
    pub password_hash: String,
}

/// Overwrite of a user's username and, when present, password hash.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub username: String,
    pub password_hash: Option<String>,
}

/// A freshly issued token pair persisted on the user document.
#[derive(Debug, Clone)]
pub struct UserTokens {
    pub token: String,
    pub refresh_token: String,
    pub token_expiry: Timestamp,
}

impl User {
    pub fn from_create(id: RecordId, input: &CreateUser) -> Self {
        Self {
            id,
            username: input.username.clone(),
            email: input.email.clone(),
            organization: input.organization.clone(),
            password_hash: input.password_hash.clone(),
            token: None,
            refresh_token: None,
            token_expiry: None,
        }
    }

    pub fn apply(&mut self, update: &UpdateUser) {
        self.username = update.username.clone();
        if let Some(hash) = &update.password_hash {
            self.password_hash = hash.clone();
        }
    }

    pub fn set_tokens(&mut self, tokens: &UserTokens) {
        self.token = Some(tokens.token.clone());
        self.refresh_token = Some(tokens.refresh_token.clone());
        self.token_expiry = Some(tokens.token_expiry);
    }
}
