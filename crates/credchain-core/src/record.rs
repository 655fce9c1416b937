//! Credential records: an immutable factual core plus mutable metadata.
//!
//! The seven facts ([`CredentialFacts`]) are fixed at issuance and form the
//! digest domain. Status, ownership, and sharing metadata are layered on
//! top and deliberately excluded from the digest.

use serde::{Deserialize, Serialize};

use crate::digest::RecordDigest;
use crate::types::{CredentialId, OrgId};

/// The lifecycle status of a credential.
///
/// `Issued` is the only creation state. `Revoked` is terminal: no
/// operation moves a record back to `Issued`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
    Issued,
    Revoked,
}

impl CredentialStatus {
    /// Stable name for reports and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialStatus::Issued => "Issued",
            CredentialStatus::Revoked => "Revoked",
        }
    }
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The immutable facts of a credential, fixed at issuance.
///
/// Field order here is the canonical hashing order; see the canonical
/// module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialFacts {
    pub id: CredentialId,
    pub subject_id: String,
    pub subject_name: String,
    pub institution: String,
    pub program: String,
    pub score: String,
    pub issue_date: String,
}

/// A full credential record as stored in a partition.
///
/// The facts are flattened into the JSON object, matching the flat wire
/// shape the share operation expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(flatten)]
    pub facts: CredentialFacts,

    /// Lowercase hex SHA-256 of the canonical facts. Engine-computed on
    /// issue; checked (never trusted) on share.
    pub digest: RecordDigest,

    pub status: CredentialStatus,

    /// The organization that issued the record. Set once at creation.
    pub owner_org: OrgId,

    /// The organization the record has been copied to. Serialized as an
    /// empty string until the first share; never cleared afterwards.
    #[serde(with = "shared_org")]
    pub shared_with_org: Option<OrgId>,
}

impl CredentialRecord {
    /// Assemble a freshly issued record.
    pub fn issued(facts: CredentialFacts, digest: RecordDigest, owner_org: OrgId) -> Self {
        Self {
            facts,
            digest,
            status: CredentialStatus::Issued,
            owner_org,
            shared_with_org: None,
        }
    }

    /// The record's credential ID.
    pub fn id(&self) -> &CredentialId {
        &self.facts.id
    }

    /// Whether the record has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.status == CredentialStatus::Revoked
    }
}

/// The structured result of an integrity check against the verifier's copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub id: CredentialId,
    pub stored_digest: RecordDigest,
    pub computed_digest: RecordDigest,
    pub matches: bool,
    #[serde(with = "shared_org")]
    pub shared_with_org: Option<OrgId>,
    pub status: CredentialStatus,
}

/// Serde adapter: `Option<OrgId>` as a required string field, empty when
/// absent. Keeps the field always present on the wire.
mod shared_org {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::OrgId;

    pub fn serialize<S: Serializer>(value: &Option<OrgId>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(org) => ser.serialize_str(org.as_str()),
            None => ser.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<OrgId>, D::Error> {
        let s = String::deserialize(de)?;
        if s.is_empty() {
            return Ok(None);
        }
        OrgId::from_str_opt(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown organization: {}", s)))
    }
}
