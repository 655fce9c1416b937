//! # Credchain Testkit
//!
//! Testing utilities shared across the workspace: memory-backed ledger
//! fixtures with substrate-style transaction contexts, and proptest
//! generators for credential facts.

pub mod fixtures;
pub mod generators;

pub use fixtures::{sample_facts, TestFixture};
pub use generators::{credential_facts, credential_id, field_value};
