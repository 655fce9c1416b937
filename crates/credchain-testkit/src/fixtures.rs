//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a memory-backed ledger and
//! monotonic per-organization transaction contexts.

use std::sync::atomic::{AtomicU64, Ordering};

use credchain::{Ledger, LedgerConfig};
use credchain_core::{CredentialFacts, CredentialId, OrgId, TxContext, TxId};
use credchain_store::MemoryStore;

/// A test fixture with a memory-backed ledger and a transaction counter.
pub struct TestFixture {
    pub ledger: Ledger<MemoryStore>,
    tx_counter: AtomicU64,
}

impl TestFixture {
    /// Create a new fixture with the default (length-prefixed) config.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create a fixture with an explicit ledger configuration.
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            ledger: Ledger::new(MemoryStore::new(), config),
            tx_counter: AtomicU64::new(0),
        }
    }

    /// Next substrate context for the given organization.
    ///
    /// Transaction ids and timestamps are strictly increasing, mimicking
    /// the substrate's total commit order.
    pub fn ctx(&self, org: OrgId) -> TxContext {
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
        TxContext::new(
            TxId::new(format!("tx-{:04}", n)),
            1_736_870_400_000 + n as i64,
            org,
        )
    }

    /// Issuer-side context.
    pub fn issuer_ctx(&self) -> TxContext {
        self.ctx(OrgId::Issuer)
    }

    /// Verifier-side context.
    pub fn verifier_ctx(&self) -> TxContext {
        self.ctx(OrgId::Verifier)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard sample facts used across tests.
pub fn sample_facts(id: &str) -> CredentialFacts {
    CredentialFacts {
        id: CredentialId::new(id),
        subject_id: "S1".into(),
        subject_name: "Alice".into(),
        institution: "Univ".into(),
        program: "CS".into(),
        score: "3.8".into(),
        issue_date: "2024-01-01".into(),
    }
}
