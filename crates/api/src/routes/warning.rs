//! Route definitions for the `/warnings` resource (read-only).

use axum::routing::get;
use axum::Router;

use crate::handlers::warning;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(warning::list_warnings))
        .route("/{id}", get(warning::get_warning))
}
