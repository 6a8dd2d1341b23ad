//! Response envelopes shared across handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// `{"message": ...}` confirmation returned by update and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

/// Outcome of a batch-register request.
///
/// Serializes as
/// `{"successful_registrations", "failed_registrations", "<key>": [...], "errors"?}`
/// and responds 201 when at least one entry was stored, 400 otherwise.
#[derive(Debug)]
pub struct BatchReport<T> {
    key: &'static str,
    created: Vec<T>,
    errors: Vec<String>,
}

impl<T> BatchReport<T> {
    /// An empty report whose created records are listed under `key`.
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            created: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn created(&mut self, item: T) {
        self.created.push(item);
    }

    pub fn failed(&mut self, error: String) {
        self.errors.push(error);
    }

    pub fn status(&self) -> StatusCode {
        if self.created.is_empty() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::CREATED
        }
    }
}

impl<T: Serialize> Serialize for BatchReport<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.errors.is_empty() { 3 } else { 4 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("successful_registrations", &self.created.len())?;
        map.serialize_entry("failed_registrations", &self.errors.len())?;
        map.serialize_entry(self.key, &self.created)?;
        if !self.errors.is_empty() {
            map.serialize_entry("errors", &self.errors)?;
        }
        map.end()
    }
}

impl<T: Serialize> IntoResponse for BatchReport<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_without_errors_omits_error_list() {
        let mut report = BatchReport::new("sensors");
        report.created(1);
        report.created(2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(report.status(), StatusCode::CREATED);
        assert_eq!(json["successful_registrations"], 2);
        assert_eq!(json["failed_registrations"], 0);
        assert_eq!(json["sensors"], serde_json::json!([1, 2]));
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn report_with_only_failures_is_bad_request() {
        let mut report: BatchReport<u8> = BatchReport::new("users");
        report.failed("Error creating user: ghost".into());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(report.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json["users"], serde_json::json!([]));
        assert_eq!(json["errors"][0], "Error creating user: ghost");
    }
}
