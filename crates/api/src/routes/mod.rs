pub mod auth;
pub mod health;
pub mod sensor;
pub mod user;
pub mod vibration;
pub mod warning;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /sensors      sensor CRUD, batch-register, register
/// /users        user CRUD, batch-register
/// /login        authenticate
/// /refresh-token
/// /warnings     read-only warning levels
/// /vibrations   vibration CRUD, batch-register, filtered listing
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sensors", sensor::router())
        .nest("/users", user::router())
        .nest("/warnings", warning::router())
        .nest("/vibrations", vibration::router())
        .merge(auth::router())
}
