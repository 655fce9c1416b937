//! The Ledger: the credential lifecycle engine.
//!
//! Composes the hash engine, the partitioned record store, and the audit
//! log into the issue / share / verify / revoke state machine. Every
//! operation takes the substrate-supplied [`TxContext`] explicitly and
//! runs the authorization check before touching any partition.

use std::sync::Arc;

use tracing::{info, warn};

use credchain_core::{
    digest, parse_record_json, validate_facts, AuditAction, AuditEvent, CanonicalFormat,
    CredentialFacts, CredentialId, CredentialRecord, CredentialStatus, IntegrityReport, OrgId,
    Partition, TxContext, ValidationError,
};
use credchain_store::{CreateOutcome, Store};

use crate::access::{authorize, Operation};
use crate::error::{LedgerError, Result};

/// Configuration for the Ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Canonical encoding used for every digest this instance computes or
    /// checks. Both ends of a share must agree.
    pub canonical_format: CanonicalFormat,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            canonical_format: CanonicalFormat::LengthPrefixed,
        }
    }
}

impl LedgerConfig {
    /// Configuration compatible with digests minted by the legacy
    /// pipe-joined canonical form.
    pub fn legacy_compatible() -> Self {
        Self {
            canonical_format: CanonicalFormat::LegacyPipeJoined,
        }
    }
}

/// The main Ledger struct.
///
/// Provides the full operation surface:
/// - Issuing and revoking credentials (issuer organization)
/// - Sharing records across the partition boundary (verifier organization)
/// - Reading and integrity-checking the verifier's copy
/// - The public audit history
pub struct Ledger<S: Store> {
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: LedgerConfig,
}

impl<S: Store> Ledger<S> {
    /// Create a new ledger instance.
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The canonical format this instance hashes with.
    pub fn canonical_format(&self) -> CanonicalFormat {
        self.config.canonical_format
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Issuer Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a new credential into the issuer partition.
    ///
    /// The digest is computed here, never taken from the caller. Issuing
    /// over an existing id is a conflict and leaves the original record
    /// unmodified.
    pub async fn issue(&self, ctx: &TxContext, facts: CredentialFacts) -> Result<CredentialRecord> {
        authorize(ctx, Operation::Issue)?;
        validate_facts(&facts)?;

        let d = digest(&facts, self.config.canonical_format);
        let record = CredentialRecord::issued(facts, d, ctx.org);

        match self
            .store
            .create_record(Partition::Issuer, &record)
            .await?
        {
            CreateOutcome::Created => {}
            CreateOutcome::AlreadyExists => {
                warn!(id = %record.id(), "issue rejected, id exists");
                return Err(LedgerError::Conflict {
                    id: record.id().clone(),
                });
            }
        }

        self.audit(ctx, record.id().clone(), AuditAction::Issue).await?;
        info!(id = %record.id(), org = %ctx.org, "credential issued");
        Ok(record)
    }

    /// Read a credential from the issuer partition.
    pub async fn read_issuer(&self, ctx: &TxContext, id: &CredentialId) -> Result<CredentialRecord> {
        authorize(ctx, Operation::ReadIssuer)?;
        self.fetch(Partition::Issuer, id).await
    }

    /// Check whether a credential exists in the issuer partition.
    pub async fn exists(&self, ctx: &TxContext, id: &CredentialId) -> Result<bool> {
        authorize(ctx, Operation::Exists)?;
        Ok(self.store.record_exists(Partition::Issuer, id).await?)
    }

    /// Revoke a credential in the issuer partition.
    ///
    /// Status becomes `Revoked`; the digest is unchanged because status is
    /// outside the hash domain. The verifier partition is deliberately not
    /// touched: propagating the revocation requires an explicit follow-up
    /// share with the re-read record.
    pub async fn revoke(&self, ctx: &TxContext, id: &CredentialId) -> Result<CredentialRecord> {
        authorize(ctx, Operation::Revoke)?;

        let mut record = self.fetch(Partition::Issuer, id).await?;
        record.status = CredentialStatus::Revoked;

        self.store.put_record(Partition::Issuer, &record).await?;
        self.audit(ctx, record.id().clone(), AuditAction::Revoke).await?;
        info!(id = %record.id(), org = %ctx.org, "credential revoked");
        Ok(record)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verifier Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Copy a record into the verifier partition from its JSON wire form.
    ///
    /// The record travels by value because the partitions have no
    /// cross-organization read channel: an issuer-side caller reads the
    /// record and hands its serialized form to the verifier-side write.
    /// The digest check at this boundary rejects any modification in
    /// transit before anything is written.
    pub async fn share_to_verifier(&self, ctx: &TxContext, record_json: &str) -> Result<CredentialRecord> {
        authorize(ctx, Operation::ShareToVerifier)?;
        let record = parse_record_json(record_json)?;
        self.share_checked(ctx, record).await
    }

    /// Typed variant of [`share_to_verifier`](Self::share_to_verifier) for
    /// callers that already hold a deserialized record.
    pub async fn share_record(&self, ctx: &TxContext, record: CredentialRecord) -> Result<CredentialRecord> {
        authorize(ctx, Operation::ShareToVerifier)?;
        if record.id().is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        self.share_checked(ctx, record).await
    }

    async fn share_checked(&self, ctx: &TxContext, mut record: CredentialRecord) -> Result<CredentialRecord> {
        let computed = digest(&record.facts, self.config.canonical_format);
        if record.digest != computed {
            warn!(id = %record.id(), "share rejected, digest mismatch");
            return Err(LedgerError::IntegrityMismatch {
                id: record.id().clone(),
                supplied: Some(record.digest),
                computed,
            });
        }

        // Idempotently re-set on every share; never cleared.
        record.shared_with_org = Some(OrgId::Verifier);

        self.store.put_record(Partition::Verifier, &record).await?;
        self.audit(ctx, record.id().clone(), AuditAction::ShareToVerifier)
            .await?;
        info!(id = %record.id(), org = %ctx.org, "credential shared to verifier");
        Ok(record)
    }

    /// Read a credential from the verifier partition.
    pub async fn verify_read(&self, ctx: &TxContext, id: &CredentialId) -> Result<CredentialRecord> {
        authorize(ctx, Operation::VerifyRead)?;
        self.fetch(Partition::Verifier, id).await
    }

    /// Recompute the digest of the verifier's copy and report the result.
    ///
    /// Never mutates. A stale copy (revoked issuer-side but not re-shared)
    /// still reports its stored status.
    pub async fn verify_integrity(&self, ctx: &TxContext, id: &CredentialId) -> Result<IntegrityReport> {
        authorize(ctx, Operation::VerifyIntegrity)?;

        let record = self.fetch(Partition::Verifier, id).await?;
        let computed = digest(&record.facts, self.config.canonical_format);

        Ok(IntegrityReport {
            id: record.id().clone(),
            stored_digest: record.digest,
            computed_digest: computed,
            matches: record.digest == computed,
            shared_with_org: record.shared_with_org,
            status: record.status,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Audit Surface
    // ─────────────────────────────────────────────────────────────────────────

    /// List the audit events for a credential in commit order.
    ///
    /// Readable by any organization; always a list, never absent, even
    /// when the id has no history.
    pub async fn history(&self, ctx: &TxContext, id: &CredentialId) -> Result<Vec<AuditEvent>> {
        authorize(ctx, Operation::History)?;
        Ok(self.store.list_events(id).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    async fn fetch(&self, partition: Partition, id: &CredentialId) -> Result<CredentialRecord> {
        self.store
            .get_record(partition, id)
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                partition,
                id: id.clone(),
            })
    }

    /// Append the audit event documenting the mutation that just committed.
    async fn audit(&self, ctx: &TxContext, id: CredentialId, action: AuditAction) -> Result<()> {
        let event = AuditEvent::from_context(ctx, id, action, "");
        self.store.append_event(&event).await?;
        Ok(())
    }
}
