//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                 -> list_users
/// POST   /                 -> create_user
/// POST   /batch-register   -> batch_register_users
/// GET    /{id}             -> get_user
/// PUT    /{id}             -> update_user
/// DELETE /{id}             -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users).post(user::create_user))
        .route("/batch-register", post(user::batch_register_users))
        .route(
            "/{id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
}
