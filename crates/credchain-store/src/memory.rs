//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use credchain_core::{AuditEvent, CredentialId, CredentialRecord, Partition, TxId};

use crate::error::Result;
use crate::traits::{CreateOutcome, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Records indexed by (partition, id).
    records: HashMap<(Partition, CredentialId), CredentialRecord>,

    /// Audit events per record, in append order.
    events: HashMap<CredentialId, Vec<AuditEvent>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                records: HashMap::new(),
                events: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_record(
        &self,
        partition: Partition,
        record: &CredentialRecord,
    ) -> Result<CreateOutcome> {
        let mut inner = self.inner.write().unwrap();
        let key = (partition, record.id().clone());

        if inner.records.contains_key(&key) {
            return Ok(CreateOutcome::AlreadyExists);
        }

        inner.records.insert(key, record.clone());
        Ok(CreateOutcome::Created)
    }

    async fn put_record(&self, partition: Partition, record: &CredentialRecord) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner
            .records
            .insert((partition, record.id().clone()), record.clone());
        Ok(())
    }

    async fn get_record(
        &self,
        partition: Partition,
        id: &CredentialId,
    ) -> Result<Option<CredentialRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.records.get(&(partition, id.clone())).cloned())
    }

    async fn record_exists(&self, partition: Partition, id: &CredentialId) -> Result<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.records.contains_key(&(partition, id.clone())))
    }

    async fn append_event(&self, event: &AuditEvent) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let events = inner.events.entry(event.record_id.clone()).or_default();

        // Same (record_id, tx_id) key replaces in place; distinct tx ids
        // accumulate in append order.
        if let Some(existing) = events.iter_mut().find(|e| e.tx_id == event.tx_id) {
            *existing = event.clone();
        } else {
            events.push(event.clone());
        }

        Ok(())
    }

    async fn list_events(&self, record_id: &CredentialId) -> Result<Vec<AuditEvent>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.events.get(record_id).cloned().unwrap_or_default())
    }
}
