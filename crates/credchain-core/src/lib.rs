//! # Credchain Core
//!
//! Pure primitives for the Credchain credential ledger: the record model,
//! canonical encoding, SHA-256 digests, audit events, and the transaction
//! context.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over the credential data model.
//!
//! ## Key Types
//!
//! - [`CredentialRecord`] - A credential: immutable facts plus lifecycle metadata
//! - [`CredentialFacts`] - The seven immutable fields that form the digest domain
//! - [`RecordDigest`] - Lowercase-hex SHA-256 integrity anchor
//! - [`AuditEvent`] - An immutable record of one committed mutation
//! - [`TxContext`] - Substrate-supplied commit context (tx id, timestamp, org)
//!
//! ## Canonicalization
//!
//! Digests are computed over a deterministic encoding of the facts. See
//! [`canonical`] for the two supported formats.

pub mod audit;
pub mod canonical;
pub mod context;
pub mod digest;
pub mod error;
pub mod record;
pub mod types;
pub mod validation;

pub use audit::{AuditAction, AuditEvent};
pub use canonical::{canonical_bytes, legacy_string, CanonicalFormat};
pub use context::TxContext;
pub use digest::{digest, RecordDigest};
pub use error::ValidationError;
pub use record::{CredentialFacts, CredentialRecord, CredentialStatus, IntegrityReport};
pub use types::{CredentialId, OrgId, Partition, TxId};
pub use validation::{parse_record_json, validate_facts};
