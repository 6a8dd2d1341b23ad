//! Opaque bearer tokens handed to sensor devices.

use rand::Rng;

/// Byte length of a device token before hex encoding.
pub const SENSOR_TOKEN_BYTES: usize = 32;

/// Generate `len` random bytes from the thread-local CSPRNG, hex-encoded.
pub fn generate_opaque_token(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rng().fill(bytes.as_mut_slice());
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
