//! Handlers for the `/users` resource.
//!
//! Responses always go through [`UserResponse`], whose `password` field is
//! the empty string.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pipesense_core::error::CoreError;
use pipesense_core::types::RecordId;
use pipesense_db::models::user::{CreateUser, UpdateUser, User, UserResponse, UserTokens};
use serde::Deserialize;

use crate::auth::jwt::{issue_token_pair, TokenPair};
use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, RecordIdPath};
use crate::response::{BatchReport, MessageResponse};
use crate::state::AppState;

const ENTITY: &str = "User";

/// Request body for `POST /users` and each entry of a batch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub organization: String,
    pub password: String,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub username: String,
    /// Left unchanged when empty.
    pub password: String,
}

fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY })
}

impl From<TokenPair> for UserTokens {
    fn from(pair: TokenPair) -> Self {
        Self {
            token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_expiry: pair.expires_at,
        }
    }
}

/// Sign a fresh token pair for `user` and persist it on the record.
///
/// Also used by login and refresh. Returns the pair that was stored.
pub(crate) async fn issue_and_store_tokens(
    state: &AppState,
    user: &mut User,
) -> AppResult<UserTokens> {
    let tokens: UserTokens = issue_token_pair(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?
        .into();

    if !state.users.set_tokens(user.id, &tokens).await? {
        return Err(not_found());
    }
    user.set_tokens(&tokens);
    Ok(tokens)
}

/// Hash the password and insert the user. Tokens are issued separately.
async fn insert_user(state: &AppState, input: CreateUserRequest) -> Result<User, InsertError> {
    let password_hash =
        hash_password(&input.password).map_err(|e| InsertError::Hash(e.to_string()))?;
    let user = state
        .users
        .create(&CreateUser {
            username: input.username,
            email: input.email,
            organization: input.organization,
            password_hash,
        })
        .await?;
    Ok(user)
}

/// Insert the user and issue its first token pair.
///
/// When the tokens cannot be stored the new record is deleted again, so a
/// failed registration leaves nothing behind.
async fn register_user(state: &AppState, input: CreateUserRequest) -> Result<User, InsertError> {
    let mut user = insert_user(state, input).await?;
    if let Err(e) = issue_and_store_tokens(state, &mut user).await {
        discard_user(state, user.id).await;
        return Err(InsertError::Tokens(e));
    }
    Ok(user)
}

async fn discard_user(state: &AppState, id: RecordId) {
    match state.users.delete(id).await {
        Ok(_) => tracing::debug!(user_id = %id, "Discarded user without tokens"),
        Err(e) => tracing::error!(user_id = %id, error = %e, "Failed to discard user"),
    }
}

/// Failure while registering one user.
#[derive(Debug, thiserror::Error)]
enum InsertError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Db(#[from] pipesense_db::DbError),
    #[error("token issue failed: {0}")]
    Tokens(AppError),
}

impl From<InsertError> for AppError {
    fn from(err: InsertError) -> Self {
        match err {
            InsertError::Hash(msg) => {
                AppError::InternalError(format!("Password hashing error: {msg}"))
            }
            InsertError::Db(e) => AppError::Database(e),
            InsertError::Tokens(e) => {
                AppError::InternalError(format!("Token storage error: {e}"))
            }
        }
    }
}

/// POST /users
///
/// Stores the password hashed and returns the user with an initial token pair.
/// Nothing is stored if the token pair cannot be persisted.
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = register_user(&state, input).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(user.into()))
}

/// PUT /users/{id}
///
/// Username is always overwritten. The password is re-hashed only when a
/// non-empty one is supplied.
pub async fn update_user(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
    ApiJson(input): ApiJson<UpdateUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    let password_hash = if input.password.is_empty() {
        None
    } else {
        Some(
            hash_password(&input.password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
        )
    };

    let update = UpdateUser {
        username: input.username,
        password_hash,
    };
    if !state.users.update(id, &update).await? {
        return Err(not_found());
    }

    tracing::info!(user_id = %id, "User updated");

    Ok(MessageResponse::new("User updated successfully"))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> AppResult<Json<MessageResponse>> {
    if !state.users.delete(id).await? {
        return Err(not_found());
    }

    tracing::info!(user_id = %id, "User deleted");

    Ok(MessageResponse::new("User deleted successfully"))
}

/// POST /users/batch-register
///
/// Entries are registered one at a time. A failed entry is reported and
/// leaves no record behind; the rest continue.
pub async fn batch_register_users(
    State(state): State<AppState>,
    ApiJson(inputs): ApiJson<Vec<CreateUserRequest>>,
) -> BatchReport<UserResponse> {
    let mut report = BatchReport::new("users");

    for input in inputs {
        let username = input.username.clone();

        match register_user(&state, input).await {
            Ok(user) => report.created(user.into()),
            Err(e) => {
                tracing::warn!(%username, error = %e, "Batch user registration failed");
                report.failed(match e {
                    InsertError::Hash(_) => format!("Error hashing password for user: {username}"),
                    InsertError::Db(_) => format!("Error creating user: {username}"),
                    InsertError::Tokens(_) => {
                        format!("Error generating tokens for user: {username}")
                    }
                });
            }
        }
    }

    report
}
