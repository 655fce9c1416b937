//! SHA-256 record digests: the system's integrity anchor.
//!
//! A digest binds the seven immutable facts of a record. It is computed by
//! the engine at issuance, carried with the record across the partition
//! boundary, and recomputed by the verifier to detect tampering in transit.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;

use crate::canonical::{canonical_bytes, CanonicalFormat};
use crate::record::CredentialFacts;

/// A 32-byte SHA-256 digest of a record's canonical facts.
///
/// Serialized as lowercase hex, the form carried inside record JSON.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordDigest(pub [u8; 32]);

impl RecordDigest {
    /// Compute the SHA-256 digest of raw bytes.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string (case-insensitive input, 64 hex chars).
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for RecordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordDigest({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for RecordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for RecordDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for RecordDigest {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecordDigest {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let s = String::deserialize(de)?;
        RecordDigest::from_hex(&s)
            .map_err(|e| serde::de::Error::custom(format!("invalid digest hex: {}", e)))
    }
}

/// Digest the canonical encoding of the facts under the given format.
///
/// Pure and deterministic: the same facts under the same format always
/// produce the same digest.
pub fn digest(facts: &CredentialFacts, format: CanonicalFormat) -> RecordDigest {
    RecordDigest::hash(&canonical_bytes(facts, format))
}
