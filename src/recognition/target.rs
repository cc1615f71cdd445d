//! Image target descriptors and their cache serialization.

use serde::{Deserialize, Serialize};

/// File extension used for cached target descriptors.
pub const TARGET_FILE_EXT: &str = "etd";

/// Descriptor of one recognizable image target.
///
/// Produced either by the cloud recognition service or decoded from a cache
/// file at startup. Immutable once obtained; the `data` payload is opaque to
/// everything outside the tracking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Unique identifier of the target.
    pub uid: String,
    /// Human-readable target name.
    pub name: String,
    /// Width / height of the reference image.
    pub aspect_ratio: f32,
    /// Engine-owned binary payload.
    #[serde(with = "payload_b64")]
    pub data: Vec<u8>,
}

impl TargetDescriptor {
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        aspect_ratio: f32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            aspect_ratio,
            data,
        }
    }

    /// Serialize to cache-file bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        // serialization of this struct cannot fail
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Decode a descriptor from cache-file bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Where a descriptor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    /// Freshly resolved by the cloud recognition service.
    Cloud,
    /// Reconstructed from the offline cache at startup.
    OfflineCache,
}

/// Base64 encoding for the opaque payload instead of a JSON integer array.
mod payload_b64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(D::Error::custom)
    }
}
