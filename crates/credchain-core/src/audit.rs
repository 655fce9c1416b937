//! Audit events: the tamper-evident record of every committed mutation.
//!
//! Events are append-only and publicly readable by either organization,
//! the one cross-organization-visible surface. Private-partition tampering
//! can be cross-checked against the shared trail.

use serde::{Deserialize, Serialize};

use crate::context::TxContext;
use crate::types::{CredentialId, OrgId, TxId};

/// The mutation a committed audit event documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Issue,
    ShareToVerifier,
    Revoke,
}

impl AuditAction {
    /// Stable name for storage and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Issue => "ISSUE",
            AuditAction::ShareToVerifier => "SHARE_TO_VERIFIER",
            AuditAction::Revoke => "REVOKE",
        }
    }

    /// Parse a stored name back into an action.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "ISSUE" => Some(AuditAction::Issue),
            "SHARE_TO_VERIFIER" => Some(AuditAction::ShareToVerifier),
            "REVOKE" => Some(AuditAction::Revoke),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One committed mutation, keyed by `(record_id, tx_id)`.
///
/// Created exactly once per successful mutating operation, immediately
/// after the mutation it documents. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub record_id: CredentialId,
    pub tx_id: TxId,
    pub action: AuditAction,
    pub acting_org: OrgId,
    /// Commit timestamp from the substrate (Unix milliseconds).
    pub timestamp_ms: i64,
    /// Free text. Always present; empty string permitted.
    pub note: String,
}

impl AuditEvent {
    /// Build an event from the committing transaction's context.
    pub fn from_context(
        ctx: &TxContext,
        record_id: CredentialId,
        action: AuditAction,
        note: impl Into<String>,
    ) -> Self {
        Self {
            record_id,
            tx_id: ctx.tx_id.clone(),
            action,
            acting_org: ctx.org,
            timestamp_ms: ctx.timestamp_ms,
            note: note.into(),
        }
    }
}
