//! Handlers for the `/sensors` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pipesense_core::error::CoreError;
use pipesense_core::types::RecordId;
use pipesense_db::models::sensor::{CreateSensor, Sensor, UpdateSensor};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::sensor_token::{generate_opaque_token, SENSOR_TOKEN_BYTES};
use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, RecordIdPath};
use crate::response::{BatchReport, MessageResponse};
use crate::state::AppState;

const ENTITY: &str = "Sensor";

/// Request body for `POST /sensors/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterSensorRequest {
    #[validate(length(min = 1, message = "serial_number is required"))]
    pub serial_number: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterSensorResponse {
    pub token: String,
    pub sensor_id: RecordId,
}

fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY })
}

/// POST /sensors
pub async fn create_sensor(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateSensor>,
) -> AppResult<(StatusCode, Json<Sensor>)> {
    let sensor = state.sensors.create(&input).await?;

    tracing::info!(sensor_id = %sensor.id, serial_number = %sensor.serial_number, "Sensor created");

    Ok((StatusCode::CREATED, Json(sensor)))
}

/// GET /sensors
pub async fn list_sensors(State(state): State<AppState>) -> AppResult<Json<Vec<Sensor>>> {
    let sensors = state.sensors.list().await?;
    Ok(Json(sensors))
}

/// GET /sensors/{id}
pub async fn get_sensor(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> AppResult<Json<Sensor>> {
    let sensor = state.sensors.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(sensor))
}

/// PUT /sensors/{id}
///
/// Full overwrite: fields missing from the body are written as zero values.
pub async fn update_sensor(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
    ApiJson(input): ApiJson<UpdateSensor>,
) -> AppResult<Json<MessageResponse>> {
    if !state.sensors.update(id, &input).await? {
        return Err(not_found());
    }

    tracing::info!(sensor_id = %id, "Sensor updated");

    Ok(MessageResponse::new("Sensor updated successfully"))
}

/// DELETE /sensors/{id}
pub async fn delete_sensor(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> AppResult<Json<MessageResponse>> {
    if !state.sensors.delete(id).await? {
        return Err(not_found());
    }

    tracing::info!(sensor_id = %id, "Sensor deleted");

    Ok(MessageResponse::new("Sensor deleted successfully"))
}

/// POST /sensors/batch-register
///
/// Each sensor gets its own device token. Entries are inserted one at a
/// time; a failed insert is reported and the rest continue.
pub async fn batch_register_sensors(
    State(state): State<AppState>,
    ApiJson(inputs): ApiJson<Vec<CreateSensor>>,
) -> BatchReport<Sensor> {
    let mut report = BatchReport::new("sensors");

    for mut input in inputs {
        input.token = Some(generate_opaque_token(SENSOR_TOKEN_BYTES));

        match state.sensors.create(&input).await {
            Ok(sensor) => report.created(sensor),
            Err(e) => {
                tracing::warn!(
                    serial_number = %input.serial_number,
                    error = %e,
                    "Batch sensor insert failed",
                );
                report.failed(format!("Error creating sensor: {}", input.serial_number));
            }
        }
    }

    report
}

/// POST /sensors/register
///
/// Issue a fresh device token for the sensor with the given serial number.
/// Every call replaces the previous token.
pub async fn register_sensor(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterSensorRequest>,
) -> AppResult<Json<RegisterSensorResponse>> {
    input.validate()?;

    let sensor = state
        .sensors
        .find_by_serial_number(&input.serial_number)
        .await?
        .ok_or_else(not_found)?;

    let token = generate_opaque_token(SENSOR_TOKEN_BYTES);
    if !state.sensors.set_token(sensor.id, &token).await? {
        return Err(not_found());
    }

    tracing::info!(sensor_id = %sensor.id, "Sensor token issued");

    Ok(Json(RegisterSensorResponse {
        token,
        sensor_id: sensor.id,
    }))
}
