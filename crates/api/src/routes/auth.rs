//! Route definitions for authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Mounted at the root.
///
/// ```text
/// POST /login          -> login
/// POST /refresh-token  -> refresh_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh-token", post(auth::refresh_token))
}
