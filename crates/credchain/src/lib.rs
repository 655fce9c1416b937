//! # Credchain
//!
//! A credential ledger for two mutually distrusting organizations: an
//! issuing authority and a verifying party, each owning an isolated record
//! partition, connected only by an explicit hash-checked share operation
//! and a shared, publicly readable audit log.
//!
//! ## Key Concepts
//!
//! - **Partition**: an organization-owned keyed store. No implicit
//!   cross-partition reads; records cross the boundary only by value.
//! - **Digest**: lowercase-hex SHA-256 over a record's seven immutable
//!   facts. The verifier recomputes it to detect tampering without
//!   trusting the channel.
//! - **Audit event**: an immutable record of one committed mutation,
//!   keyed by `(record_id, tx_id)`, readable by anyone.
//! - **TxContext**: the substrate-supplied commit context (transaction id,
//!   timestamp, authenticated organization), passed into every operation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use credchain::{Ledger, LedgerConfig};
//! use credchain::core::{CredentialFacts, CredentialId, OrgId, TxContext, TxId};
//! use credchain::store::SqliteStore;
//!
//! async fn example() {
//!     let store = SqliteStore::open("ledger.db").unwrap();
//!     let ledger = Ledger::new(store, LedgerConfig::default());
//!
//!     let ctx = TxContext::new(TxId::new("tx-1"), 1736870400000, OrgId::Issuer);
//!     let facts = CredentialFacts {
//!         id: CredentialId::new("C1"),
//!         subject_id: "S1".into(),
//!         subject_name: "Alice".into(),
//!         institution: "Univ".into(),
//!         program: "CS".into(),
//!         score: "3.8".into(),
//!         issue_date: "2024-01-01".into(),
//!     };
//!     let record = ledger.issue(&ctx, facts).await.unwrap();
//!     println!("issued {} with digest {}", record.id(), record.digest);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `credchain::core` - Core primitives (records, digests, audit events)
//! - `credchain::store` - Storage abstraction, SQLite and memory backends

pub mod access;
pub mod engine;
pub mod error;

// Re-export component crates
pub use credchain_core as core;
pub use credchain_store as store;

// Re-export main types for convenience
pub use access::{authorize, Operation};
pub use engine::{Ledger, LedgerConfig};
pub use error::{LedgerError, Result};

// Re-export commonly used core types
pub use credchain_core::{
    AuditAction, AuditEvent, CanonicalFormat, CredentialFacts, CredentialId, CredentialRecord,
    CredentialStatus, IntegrityReport, OrgId, Partition, RecordDigest, TxContext, TxId,
};
