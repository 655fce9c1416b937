//! The per-transaction commit context supplied by the external substrate.
//!
//! Every engine operation receives a [`TxContext`] as an explicit value,
//! never as ambient or global state. The substrate guarantees the transaction
//! id is unique per commit, the timestamp follows commit order, and the
//! organization identity is authenticated (not forgeable by the caller).

use crate::types::{OrgId, TxId};

/// Substrate-provided context for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxContext {
    /// Unique identifier of the committing transaction.
    pub tx_id: TxId,
    /// Commit timestamp, Unix milliseconds.
    pub timestamp_ms: i64,
    /// The verified organization identity of the caller.
    pub org: OrgId,
}

impl TxContext {
    /// Create a new context.
    pub fn new(tx_id: TxId, timestamp_ms: i64, org: OrgId) -> Self {
        Self {
            tx_id,
            timestamp_ms,
            org,
        }
    }
}
