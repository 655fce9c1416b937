//! Store trait: the abstract interface for partitioned record persistence.
//!
//! Two logically isolated record partitions (issuer, verifier) plus the
//! shared append-only audit log. The store is mechanism, not policy:
//! organization gating happens in the engine before any store call.

use async_trait::async_trait;
use credchain_core::{AuditEvent, CredentialId, CredentialRecord, Partition};

use crate::error::Result;

/// Result of an insert-if-absent record write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The record was new and has been written.
    Created,
    /// A record with this id already exists in the partition; nothing was
    /// written and the existing record is unmodified.
    AlreadyExists,
}

/// The Store trait: async interface for record and audit persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, `spawn_blocking` is used internally to avoid blocking the
/// runtime.
///
/// # Design Notes
///
/// - **Insert-if-absent**: `create_record` never overwrites; a racing
///   duplicate observes `AlreadyExists`. Upserts go through `put_record`.
/// - **Audit composite keys**: events are keyed `(record_id, tx_id)`, so
///   repeated actions on the same record accumulate rather than collide.
///   Re-appending under an existing key replaces that event, matching the
///   commit semantics of the underlying substrate.
/// - **Commit-order listing**: `list_events` returns events in the order
///   they were appended, as an empty (never absent) sequence.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a record into a partition only if its id is absent there.
    async fn create_record(
        &self,
        partition: Partition,
        record: &CredentialRecord,
    ) -> Result<CreateOutcome>;

    /// Write a record into a partition, replacing any existing record with
    /// the same id.
    async fn put_record(&self, partition: Partition, record: &CredentialRecord) -> Result<()>;

    /// Get a record from a partition by id.
    async fn get_record(
        &self,
        partition: Partition,
        id: &CredentialId,
    ) -> Result<Option<CredentialRecord>>;

    /// Check whether a record exists in a partition.
    async fn record_exists(&self, partition: Partition, id: &CredentialId) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Audit Log Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append an audit event under its `(record_id, tx_id)` key.
    async fn append_event(&self, event: &AuditEvent) -> Result<()>;

    /// List all audit events for a record in commit order.
    ///
    /// Returns an empty vec (never an error) when the record has no
    /// history.
    async fn list_events(&self, record_id: &CredentialId) -> Result<Vec<AuditEvent>>;
}
