//! Route definitions for the `/sensors` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sensor;
use crate::state::AppState;

/// Routes mounted at `/sensors`.
///
/// ```text
/// GET    /                 -> list_sensors
/// POST   /                 -> create_sensor
/// POST   /batch-register   -> batch_register_sensors
/// POST   /register         -> register_sensor
/// GET    /{id}             -> get_sensor
/// PUT    /{id}             -> update_sensor
/// DELETE /{id}             -> delete_sensor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sensor::list_sensors).post(sensor::create_sensor))
        .route("/batch-register", post(sensor::batch_register_sensors))
        .route("/register", post(sensor::register_sensor))
        .route(
            "/{id}",
            get(sensor::get_sensor)
                .put(sensor::update_sensor)
                .delete(sensor::delete_sensor),
        )
}
