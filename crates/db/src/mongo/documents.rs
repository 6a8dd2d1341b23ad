//! BSON document shapes and their typed filter/update translations.
//!
//! Field names match the collections as they exist in deployed databases.

use bson::oid::ObjectId;
use bson::{doc, DateTime, Document};
use serde::{Deserialize, Serialize};

use crate::models::sensor::{Sensor, SensorConfig, UpdateSensor};
use crate::models::user::{UpdateUser, User, UserTokens};
use crate::models::vibration::{Measurements, UpdateVibration, VibrationData, VibrationFilter};
use crate::models::warning::Warning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SensorDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub config: SensorConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub organization: String,
    /// Stored under the legacy `password` key; always a hash.
    #[serde(rename = "password", default)]
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<DateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct VibrationDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub sensor_id: ObjectId,
    pub warn_id: ObjectId,
    pub timestamp: DateTime,
    // Measurements live at the top level of the document. Not flattened, so
    // the id and date fields keep their native BSON deserialization.
    #[serde(default)]
    pub x_axisg: f64,
    #[serde(default)]
    pub y_axisg: f64,
    #[serde(default)]
    pub z_axisg: f64,
    #[serde(default)]
    pub x_axismm_s2: f64,
    #[serde(default)]
    pub y_axismm_s2: f64,
    #[serde(default)]
    pub z_axismm_s2: f64,
    #[serde(default)]
    pub x_axismm_s: f64,
    #[serde(default)]
    pub y_axismm_s: f64,
    #[serde(default)]
    pub z_axismm_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WarningDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub level: i32,
    pub name: String,
}

impl From<&Sensor> for SensorDocument {
    fn from(s: &Sensor) -> Self {
        Self {
            id: s.id.into(),
            user_id: s.user_id.into(),
            serial_number: s.serial_number.clone(),
            location: s.location.clone(),
            picture: s.picture.clone(),
            config: s.config,
            token: s.token.clone(),
        }
    }
}

impl From<SensorDocument> for Sensor {
    fn from(d: SensorDocument) -> Self {
        Self {
            id: d.id.into(),
            user_id: d.user_id.into(),
            serial_number: d.serial_number,
            location: d.location,
            picture: d.picture,
            config: d.config,
            token: d.token,
        }
    }
}

impl From<&User> for UserDocument {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.into(),
            username: u.username.clone(),
            email: u.email.clone(),
            organization: u.organization.clone(),
            password_hash: u.password_hash.clone(),
            token: u.token.clone(),
            refresh_token: u.refresh_token.clone(),
            token_expiry: u.token_expiry.map(DateTime::from_chrono),
        }
    }
}

impl From<UserDocument> for User {
    fn from(d: UserDocument) -> Self {
        Self {
            id: d.id.into(),
            username: d.username,
            email: d.email,
            organization: d.organization,
            password_hash: d.password_hash,
            token: d.token,
            refresh_token: d.refresh_token,
            token_expiry: d.token_expiry.map(DateTime::to_chrono),
        }
    }
}

impl From<&VibrationData> for VibrationDocument {
    fn from(v: &VibrationData) -> Self {
        let m = &v.measurements;
        Self {
            id: v.id.into(),
            sensor_id: v.sensor_id.into(),
            warn_id: v.warn_id.into(),
            timestamp: DateTime::from_chrono(v.timestamp),
            x_axisg: m.x_axisg,
            y_axisg: m.y_axisg,
            z_axisg: m.z_axisg,
            x_axismm_s2: m.x_axismm_s2,
            y_axismm_s2: m.y_axismm_s2,
            z_axismm_s2: m.z_axismm_s2,
            x_axismm_s: m.x_axismm_s,
            y_axismm_s: m.y_axismm_s,
            z_axismm_s: m.z_axismm_s,
        }
    }
}

impl From<VibrationDocument> for VibrationData {
    fn from(d: VibrationDocument) -> Self {
        Self {
            id: d.id.into(),
            sensor_id: d.sensor_id.into(),
            warn_id: d.warn_id.into(),
            timestamp: d.timestamp.to_chrono(),
            measurements: Measurements {
                x_axisg: d.x_axisg,
                y_axisg: d.y_axisg,
                z_axisg: d.z_axisg,
                x_axismm_s2: d.x_axismm_s2,
                y_axismm_s2: d.y_axismm_s2,
                z_axismm_s2: d.z_axismm_s2,
                x_axismm_s: d.x_axismm_s,
                y_axismm_s: d.y_axismm_s,
                z_axismm_s: d.z_axismm_s,
            },
        }
    }
}

impl From<&Warning> for WarningDocument {
    fn from(w: &Warning) -> Self {
        Self {
            id: w.id.into(),
            level: w.level,
            name: w.name.clone(),
        }
    }
}

impl From<WarningDocument> for Warning {
    fn from(d: WarningDocument) -> Self {
        Self {
            id: d.id.into(),
            level: d.level,
            name: d.name,
        }
    }
}

pub(crate) fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

pub(crate) fn sensor_update(input: &UpdateSensor) -> Document {
    doc! {
        "$set": {
            "user_id": ObjectId::from(input.user_id),
            "serial_number": input.serial_number.as_str(),
            "location": input.location.as_str(),
            "picture": input.picture.as_str(),
            "config": {
                "fmax": input.config.fmax,
                "lor": input.config.lor,
                "g_max": input.config.g_max,
                "alarm_ths": input.config.alarm_ths,
            },
        }
    }
}

pub(crate) fn sensor_token_update(token: &str) -> Document {
    doc! { "$set": { "token": token } }
}

/// Username is always overwritten; the hash only when a new password was given.
pub(crate) fn user_update(input: &UpdateUser) -> Document {
    let mut set = doc! { "username": input.username.as_str() };
    if let Some(hash) = &input.password_hash {
        set.insert("password", hash.as_str());
    }
    doc! { "$set": set }
}

pub(crate) fn user_tokens_update(tokens: &UserTokens) -> Document {
    doc! {
        "$set": {
            "token": tokens.token.as_str(),
            "refresh_token": tokens.refresh_token.as_str(),
            "token_expiry": DateTime::from_chrono(tokens.token_expiry),
        }
    }
}

pub(crate) fn vibration_update(input: &UpdateVibration) -> Document {
    let m = &input.measurements;
    doc! {
        "$set": {
            "sensor_id": ObjectId::from(input.sensor_id),
            "warn_id": ObjectId::from(input.warn_id),
            "timestamp": DateTime::from_chrono(input.timestamp),
            "x_axisg": m.x_axisg,
            "y_axisg": m.y_axisg,
            "z_axisg": m.z_axisg,
            "x_axismm_s2": m.x_axismm_s2,
            "y_axismm_s2": m.y_axismm_s2,
            "z_axismm_s2": m.z_axismm_s2,
            "x_axismm_s": m.x_axismm_s,
            "y_axismm_s": m.y_axismm_s,
            "z_axismm_s": m.z_axismm_s,
        }
    }
}

pub(crate) fn vibration_filter(filter: &VibrationFilter) -> Document {
    let mut query = Document::new();
    if let Some(id) = filter.sensor_id {
        query.insert("sensor_id", ObjectId::from(id));
    }
    if let Some(id) = filter.warn_id {
        query.insert("warn_id", ObjectId::from(id));
    }

    let mut range = Document::new();
    if let Some(start) = filter.start {
        range.insert("$gte", DateTime::from_chrono(start));
    }
    if let Some(end) = filter.end {
        range.insert("$lte", DateTime::from_chrono(end));
    }
    if !range.is_empty() {
        query.insert("timestamp", range);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pipesense_core::types::RecordId;

    #[test]
    fn empty_filter_is_empty_document() {
        assert!(vibration_filter(&VibrationFilter::default()).is_empty());
    }

    #[test]
    fn filter_combines_range_bounds_under_one_key() {
        let sensor = RecordId::generate();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let query = vibration_filter(&VibrationFilter {
            sensor_id: Some(sensor),
            warn_id: None,
            start: Some(start),
            end: Some(end),
        });

        assert_eq!(query.get_object_id("sensor_id").unwrap(), ObjectId::from(sensor));
        assert!(!query.contains_key("warn_id"));
        let range = query.get_document("timestamp").unwrap();
        assert_eq!(range.get_datetime("$gte").unwrap(), &DateTime::from_chrono(start));
        assert_eq!(range.get_datetime("$lte").unwrap(), &DateTime::from_chrono(end));
    }

    #[test]
    fn user_update_keeps_hash_when_password_absent() {
        let update = user_update(&UpdateUser {
            username: "renamed".into(),
            password_hash: None,
        });
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("username").unwrap(), "renamed");
        assert!(!set.contains_key("password"));
    }

    #[test]
    fn sensor_update_overwrites_nested_config() {
        let update = sensor_update(&UpdateSensor::default());
        let config = update
            .get_document("$set")
            .and_then(|set| set.get_document("config"))
            .unwrap();
        assert_eq!(config.get_i64("fmax").unwrap(), 0);
        assert_eq!(config.get_i64("alarm_ths").unwrap(), 0);
    }
}
