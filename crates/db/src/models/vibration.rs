//! Vibration reading model, DTOs and the typed listing filter.

use pipesense_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// The nine measured channels of one reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
    /// Acceleration in g.
    pub x_axisg: f64,
    pub y_axisg: f64,
    pub z_axisg: f64,
    /// Acceleration in mm/s².
    pub x_axismm_s2: f64,
    pub y_axismm_s2: f64,
    pub z_axismm_s2: f64,
    /// Velocity in mm/s.
    pub x_axismm_s: f64,
    pub y_axismm_s: f64,
    pub z_axismm_s: f64,
}

/// A document from the `vibrations` collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VibrationData {
    pub id: RecordId,
    pub sensor_id: RecordId,
    /// Zero when the reading carries no warning level.
    pub warn_id: RecordId,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub measurements: Measurements,
}

/// A reading ready to be written. References are validated by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateVibration {
    pub sensor_id: RecordId,
    pub warn_id: RecordId,
    pub timestamp: Timestamp,
    pub measurements: Measurements,
}

/// Updates overwrite every field except the id, so they carry the same shape.
pub type UpdateVibration = CreateVibration;

impl VibrationData {
    pub fn from_create(id: RecordId, input: &CreateVibration) -> Self {
        Self {
            id,
            sensor_id: input.sensor_id,
            warn_id: input.warn_id,
            timestamp: input.timestamp,
            measurements: input.measurements,
        }
    }

    pub fn apply(&mut self, update: &UpdateVibration) {
        self.sensor_id = update.sensor_id;
        self.warn_id = update.warn_id;
        self.timestamp = update.timestamp;
        self.measurements = update.measurements;
    }
}

/// Equality and inclusive time-range filter for listing readings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VibrationFilter {
    pub sensor_id: Option<RecordId>,
    pub warn_id: Option<RecordId>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl VibrationFilter {
    /// Evaluate the filter against a reading in memory.
    pub fn matches(&self, reading: &VibrationData) -> bool {
        self.sensor_id.is_none_or(|id| reading.sensor_id == id)
            && self.warn_id.is_none_or(|id| reading.warn_id == id)
            && self.start.is_none_or(|start| reading.timestamp >= start)
            && self.end.is_none_or(|end| reading.timestamp <= end)
    }
}

/// Largest offset the Mongo driver can encode (`skip` travels as an i64).
const MAX_SKIP: u64 = i64::MAX as u64;

/// Offset window over a newest-first listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    /// Window for a 1-based page number. Offsets past [`MAX_SKIP`] are
    /// clamped; such a page is simply empty.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(limit).min(MAX_SKIP),
            limit,
        }
    }
}
