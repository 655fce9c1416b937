//! # Credchain Store
//!
//! Storage abstraction for Credchain. Provides a trait-based interface for
//! partitioned record persistence and the audit log, with SQLite and
//! in-memory implementations.
//!
//! ## Overview
//!
//! The store module abstracts persistence behind the [`Store`] trait,
//! keeping the lifecycle engine storage-agnostic. The primary
//! implementation is [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`CreateOutcome`] - Result of an insert-if-absent record write
//!
//! ## Design Notes
//!
//! - **Two partitions, one audit log**: issuer and verifier records live in
//!   isolated keyspaces; audit events are a shared append-only sequence.
//! - **Insert-if-absent**: `create_record` never overwrites an existing id.
//! - **Composite audit keys**: events keyed `(record_id, tx_id)` accumulate
//!   per record and list in commit order.
//! - **Policy-free**: organization gating is the engine's job, done before
//!   any store call reaches this crate.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{CreateOutcome, Store};
