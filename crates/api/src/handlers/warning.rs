//! Read-only handlers for the `/warnings` resource.

use axum::extract::State;
use axum::Json;
use pipesense_core::error::CoreError;
use pipesense_db::models::warning::Warning;

use crate::error::{AppError, AppResult};
use crate::extract::RecordIdPath;
use crate::state::AppState;

/// GET /warnings
pub async fn list_warnings(State(state): State<AppState>) -> AppResult<Json<Vec<Warning>>> {
    let warnings = state.warnings.list().await?;
    Ok(Json(warnings))
}

/// GET /warnings/{id}
pub async fn get_warning(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> AppResult<Json<Warning>> {
    let warning = state
        .warnings
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Warning" }))?;
    Ok(Json(warning))
}
