use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Primary and foreign key for every stored record.
///
/// A 12-byte object id, ordered by creation time, rendered on the wire as a
/// 24-character lowercase hex string. The all-zero id stands for "unset".
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(ObjectId);

impl RecordId {
    /// The all-zero id, used for absent optional references.
    pub const ZERO: RecordId = RecordId(ObjectId::from_bytes([0; 12]));

    /// Allocate a fresh id from the object-id generator.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0.to_hex())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Returned when a string is not a 24-character hex object id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid record id: {0:?}")]
pub struct InvalidRecordId(pub String);

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidRecordId(s.to_string()))
    }
}

impl From<ObjectId> for RecordId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<RecordId> for ObjectId {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordIdVisitor;

        impl Visitor<'_> for RecordIdVisitor {
            type Value = RecordId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 24-character hex object id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
                // Clients echo unset references back as "".
                if v.is_empty() {
                    return Ok(RecordId::ZERO);
                }
                v.parse().map_err(E::custom)
            }

            fn visit_unit<E: de::Error>(self) -> Result<RecordId, E> {
                Ok(RecordId::ZERO)
            }
        }

        deserializer.deserialize_any(RecordIdVisitor)
    }
}

/// Whether a timestamp carries no real value.
///
/// Anything at or before the Unix epoch counts as zero, which covers both
/// the epoch written for an absent timestamp and year-one values sent by
/// clients that serialize an unset time.
pub fn is_zero_timestamp(ts: &Timestamp) -> bool {
    ts.timestamp_millis() <= 0
}

/// The value written for a timestamp the caller left out.
pub fn zero_timestamp() -> Timestamp {
    chrono::DateTime::UNIX_EPOCH
}
