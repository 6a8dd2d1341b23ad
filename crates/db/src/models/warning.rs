//! Warning level model.

use pipesense_core::types::RecordId;
use serde::Serialize;

/// A document from the `warnings` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub id: RecordId,
    /// Severity rank, 1 (Normal) to 4 (Emergency).
    pub level: i32,
    pub name: String,
}

/// DTO for seeding a warning level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWarning {
    pub level: i32,
    pub name: String,
}
