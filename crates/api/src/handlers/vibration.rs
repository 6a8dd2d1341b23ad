//! Handlers for the `/vibrations` resource.
//!
//! Readings must reference an existing sensor, and an existing warning level
//! when `warn_id` is non-zero. References are checked before anything is
//! written.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pipesense_core::error::CoreError;
use pipesense_core::types::{is_zero_timestamp, zero_timestamp, RecordId, Timestamp};
use pipesense_db::models::vibration::{CreateVibration, Measurements, VibrationData};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery, RecordIdPath};
use crate::query::VibrationListParams;
use crate::response::{BatchReport, MessageResponse};
use crate::state::AppState;

const ENTITY: &str = "Vibration data";

/// Request body for create, update and each batch entry.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VibrationRequest {
    pub sensor_id: RecordId,
    pub warn_id: RecordId,
    pub timestamp: Option<Timestamp>,
    #[serde(flatten)]
    pub measurements: Measurements,
}

impl VibrationRequest {
    /// For inserts: a missing or zero timestamp becomes `now`.
    fn into_create(self, now: Timestamp) -> CreateVibration {
        let timestamp = self
            .timestamp
            .filter(|ts| !is_zero_timestamp(ts))
            .unwrap_or(now);
        CreateVibration {
            sensor_id: self.sensor_id,
            warn_id: self.warn_id,
            timestamp,
            measurements: self.measurements,
        }
    }

    /// For updates: every field is overwritten, a missing timestamp included.
    fn into_update(self) -> CreateVibration {
        CreateVibration {
            sensor_id: self.sensor_id,
            warn_id: self.warn_id,
            timestamp: self.timestamp.unwrap_or_else(zero_timestamp),
            measurements: self.measurements,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    /// Matching readings across all pages.
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Serialize)]
pub struct VibrationPage {
    pub data: Vec<VibrationData>,
    pub pagination: Pagination,
}

/// A reading whose references do not resolve.
#[derive(Debug)]
enum ReferenceError {
    MissingSensor,
    UnknownSensor(RecordId),
    UnknownWarning(RecordId),
}

impl ReferenceError {
    fn single_message(&self) -> String {
        match self {
            Self::MissingSensor => "Sensor ID is required".into(),
            Self::UnknownSensor(_) => "Invalid sensor ID".into(),
            Self::UnknownWarning(_) => "Invalid warning ID".into(),
        }
    }

    fn batch_message(&self) -> String {
        match self {
            Self::MissingSensor => "Sensor ID is required for all entries".into(),
            Self::UnknownSensor(id) => format!("Invalid sensor ID: {id}"),
            Self::UnknownWarning(id) => format!("Invalid warning ID: {id}"),
        }
    }
}

/// Check the reading's sensor and, when non-zero, warning references.
///
/// The outer `Result` carries store failures; the inner one the verdict.
async fn check_references(
    state: &AppState,
    input: &VibrationRequest,
) -> AppResult<Result<(), ReferenceError>> {
    if input.sensor_id.is_zero() {
        return Ok(Err(ReferenceError::MissingSensor));
    }
    if state.sensors.find_by_id(input.sensor_id).await?.is_none() {
        return Ok(Err(ReferenceError::UnknownSensor(input.sensor_id)));
    }
    if !input.warn_id.is_zero() && state.warnings.find_by_id(input.warn_id).await?.is_none() {
        return Ok(Err(ReferenceError::UnknownWarning(input.warn_id)));
    }
    Ok(Ok(()))
}

fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY })
}

/// POST /vibrations
pub async fn create_vibration(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<VibrationRequest>,
) -> AppResult<(StatusCode, Json<VibrationData>)> {
    if let Err(e) = check_references(&state, &input).await? {
        return Err(AppError::Core(CoreError::Validation(e.single_message())));
    }

    let reading = state.vibrations.create(&input.into_create(Utc::now())).await?;

    tracing::debug!(
        vibration_id = %reading.id,
        sensor_id = %reading.sensor_id,
        "Vibration data stored",
    );

    Ok((StatusCode::CREATED, Json(reading)))
}

/// GET /vibrations
///
/// Newest first. Supports `sensor_id`, `warn_id`, inclusive `start_date` /
/// `end_date` (RFC 3339), and `page` / `limit`.
pub async fn list_vibrations(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<VibrationListParams>,
) -> AppResult<Json<VibrationPage>> {
    let filter = params.filter();
    let (page, limit) = params.pagination();

    let data = state.vibrations.list(&filter, params.page()).await?;
    let total = state.vibrations.count(&filter).await?;

    Ok(Json(VibrationPage {
        data,
        pagination: Pagination { total, page, limit },
    }))
}

/// GET /vibrations/{id}
pub async fn get_vibration(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> AppResult<Json<VibrationData>> {
    let reading = state.vibrations.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(reading))
}

/// PUT /vibrations/{id}
///
/// Full overwrite of everything but the id. References are not re-checked.
pub async fn update_vibration(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
    ApiJson(input): ApiJson<VibrationRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !state.vibrations.update(id, &input.into_update()).await? {
        return Err(not_found());
    }

    tracing::info!(vibration_id = %id, "Vibration data updated");

    Ok(MessageResponse::new("Vibration data updated"))
}

/// DELETE /vibrations/{id}
pub async fn delete_vibration(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> AppResult<Json<MessageResponse>> {
    if !state.vibrations.delete(id).await? {
        return Err(not_found());
    }

    tracing::info!(vibration_id = %id, "Vibration data deleted");

    Ok(MessageResponse::new("Vibration data deleted"))
}

/// POST /vibrations/batch-register
///
/// Every entry is checked first; one bad reference rejects the whole batch
/// before anything is stored. Inserts then run in input order.
pub async fn batch_register_vibrations(
    State(state): State<AppState>,
    ApiJson(inputs): ApiJson<Vec<VibrationRequest>>,
) -> AppResult<BatchReport<VibrationData>> {
    for input in &inputs {
        if let Err(e) = check_references(&state, input).await? {
            return Err(AppError::Core(CoreError::Validation(e.batch_message())));
        }
    }

    let now = Utc::now();
    let mut report = BatchReport::new("vibrations");

    for input in inputs {
        let sensor_id = input.sensor_id;
        match state.vibrations.create(&input.into_create(now)).await {
            Ok(reading) => report.created(reading),
            Err(e) => {
                tracing::warn!(%sensor_id, error = %e, "Batch vibration insert failed");
                report.failed(format!("Error creating vibration data for sensor: {sensor_id}"));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timestamp_on_create_becomes_now() {
        let now = Utc::now();
        let request = VibrationRequest {
            timestamp: Some(zero_timestamp()),
            ..Default::default()
        };
        assert_eq!(request.into_create(now).timestamp, now);
        assert_eq!(VibrationRequest::default().into_create(now).timestamp, now);
    }

    #[test]
    fn missing_timestamp_on_update_is_written_as_zero() {
        let update = VibrationRequest::default().into_update();
        assert!(is_zero_timestamp(&update.timestamp));
    }

    #[test]
    fn measurements_bind_from_top_level_fields() {
        let request: VibrationRequest = serde_json::from_value(serde_json::json!({
            "sensor_id": "65f1a2b3c4d5e6f708192a3b",
            "warn_id": "",
            "x_axisg": 0.25,
            "z_axismm_s": 3.5,
        }))
        .unwrap();
        assert!(request.warn_id.is_zero());
        assert_eq!(request.measurements.x_axisg, 0.25);
        assert_eq!(request.measurements.z_axismm_s, 3.5);
        assert_eq!(request.measurements.y_axisg, 0.0);
        assert!(request.timestamp.is_none());
    }

    #[test]
    fn batch_messages_name_the_offending_id() {
        let id: RecordId = "65f1a2b3c4d5e6f708192a3b".parse().unwrap();
        assert_eq!(
            ReferenceError::UnknownSensor(id).batch_message(),
            "Invalid sensor ID: 65f1a2b3c4d5e6f708192a3b"
        );
        assert_eq!(ReferenceError::UnknownWarning(id).single_message(), "Invalid warning ID");
    }
}
