//! Strong type definitions for Credchain.
//!
//! Identifiers are newtypes to prevent misuse at compile time, and the
//! two-organization topology is closed enums rather than free-form strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A credential identifier, assigned by the issuer and immutable once set.
///
/// Opaque to the engine; uniqueness is scoped per partition.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(String);

impl CredentialId {
    /// Create a new credential ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the ID carries no characters at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialId({})", self.0)
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CredentialId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CredentialId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for CredentialId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A substrate-assigned transaction identifier.
///
/// Unique per committed transaction; combined with a record ID it forms
/// the composite key under which audit events are stored.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    /// Create a new transaction ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.0)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TxId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TxId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An authenticated organization identity.
///
/// Supplied by the external substrate per call; the engine never derives
/// it from caller input. The JSON form keeps the MSP names used on the
/// wire by the legacy deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrgId {
    /// The issuing authority ("Org1").
    #[serde(rename = "Org1MSP")]
    Issuer,
    /// The verifying party ("Org2").
    #[serde(rename = "Org2MSP")]
    Verifier,
}

impl OrgId {
    /// The wire name of the organization.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgId::Issuer => "Org1MSP",
            OrgId::Verifier => "Org2MSP",
        }
    }

    /// Parse a wire name back into an organization identity.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "Org1MSP" => Some(OrgId::Issuer),
            "Org2MSP" => Some(OrgId::Verifier),
            _ => None,
        }
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two isolated record stores.
///
/// A partition is owned by exactly one organization; there is no implicit
/// cross-partition read or write channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partition {
    /// Org1's private collection of issued credentials.
    Issuer,
    /// Org2's private collection of shared copies.
    Verifier,
}

impl Partition {
    /// The organization that owns (and may read/write) this partition.
    pub fn owner(&self) -> OrgId {
        match self {
            Partition::Issuer => OrgId::Issuer,
            Partition::Verifier => OrgId::Verifier,
        }
    }

    /// Stable name used for storage keys and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Issuer => "issuer",
            Partition::Verifier => "verifier",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
