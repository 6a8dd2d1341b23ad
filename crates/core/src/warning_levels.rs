//! The fixed severity ladder seeded into an empty `warnings` collection.

pub const LEVEL_NORMAL: i32 = 1;
pub const LEVEL_WARNING: i32 = 2;
pub const LEVEL_CRITICAL: i32 = 3;
pub const LEVEL_EMERGENCY: i32 = 4;

/// `(level, name)` pairs in ascending severity.
pub const DEFAULT_WARNING_LEVELS: [(i32, &str); 4] = [
    (LEVEL_NORMAL, "Normal"),
    (LEVEL_WARNING, "Warning"),
    (LEVEL_CRITICAL, "Critical"),
    (LEVEL_EMERGENCY, "Emergency"),
];
