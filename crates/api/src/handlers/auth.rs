//! Handlers for login and token refresh.

use axum::extract::State;
use axum::Json;
use pipesense_core::error::CoreError;
use pipesense_core::types::Timestamp;
use pipesense_db::models::user::UserResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{verify_refresh_token, TokenError};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::user::issue_and_store_tokens;
use crate::state::AppState;

/// Request body for `POST /login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub message: &'static str,
}

/// Request body for `POST /refresh-token`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// POST /login
///
/// Unknown username and wrong password are indistinguishable to the caller.
/// Every failure carries `"message": "Login failed"`.
pub async fn login(
    State(state): State<AppState>,
    body: Result<ApiJson<LoginRequest>, AppError>,
) -> AppResult<Json<LoginResponse>> {
    authenticate(&state, body)
        .await
        .map_err(|e| e.with_message("Login failed"))
}

async fn authenticate(
    state: &AppState,
    body: Result<ApiJson<LoginRequest>, AppError>,
) -> AppResult<Json<LoginResponse>> {
    let ApiJson(input) = body?;

    let mut user = state
        .users
        .find_by_username(&input.username)
        .await?
        .ok_or_else(|| unauthorized("Invalid username or password"))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %input.username, "Login rejected");
        return Err(unauthorized("Invalid username or password"));
    }

    issue_and_store_tokens(state, &mut user).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user: user.into(),
        message: "Login success",
    }))
}

/// POST /refresh-token
///
/// Rotates the stored token pair. A rejected token leaves the user untouched.
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    input.validate()?;

    let user_id = verify_refresh_token(&input.refresh_token, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, "Refresh token rejected");
        match e {
            TokenError::Invalid(_) => unauthorized("Invalid refresh token"),
            TokenError::InvalidUserId(_) => unauthorized("Invalid user ID in token"),
        }
    })?;

    let mut user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))?;

    let tokens = issue_and_store_tokens(&state, &mut user).await?;

    tracing::info!(user_id = %user.id, "Tokens refreshed");

    Ok(Json(RefreshResponse {
        token: tokens.token,
        refresh_token: tokens.refresh_token,
        expires_at: tokens.token_expiry,
    }))
}
