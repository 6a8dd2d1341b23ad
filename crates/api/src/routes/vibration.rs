//! Route definitions for the `/vibrations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::vibration;
use crate::state::AppState;

/// Routes mounted at `/vibrations`.
///
/// ```text
/// GET    /                 -> list_vibrations (filter + pagination query)
/// POST   /                 -> create_vibration
/// POST   /batch-register   -> batch_register_vibrations
/// GET    /{id}             -> get_vibration
/// PUT    /{id}             -> update_vibration
/// DELETE /{id}             -> delete_vibration
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(vibration::list_vibrations).post(vibration::create_vibration),
        )
        .route(
            "/batch-register",
            post(vibration::batch_register_vibrations),
        )
        .route(
            "/{id}",
            get(vibration::get_vibration)
                .put(vibration::update_vibration)
                .delete(vibration::delete_vibration),
        )
}
