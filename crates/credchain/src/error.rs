//! Error taxonomy for the lifecycle engine.
//!
//! Every failure is a distinct kind with enough structured detail to act
//! on without retrying blindly: re-authenticate on `Unauthorized`, fix
//! input on `Validation`, retry on `Store`.

use credchain_core::{CredentialId, OrgId, Partition, RecordDigest, ValidationError};
use credchain_store::StoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The caller's organization is not allowed to perform the operation.
    #[error("operation {operation} requires {required}, caller is {actual}")]
    Unauthorized {
        operation: &'static str,
        required: OrgId,
        actual: OrgId,
    },

    /// The referenced credential is absent from the required partition.
    #[error("credential {id} not found in {partition} partition")]
    NotFound {
        partition: Partition,
        id: CredentialId,
    },

    /// Issuing over an id that already exists.
    #[error("credential {id} already exists")]
    Conflict { id: CredentialId },

    /// The supplied digest does not match the recomputed canonical digest.
    #[error("digest mismatch for {id}: supplied={supplied:?} computed={computed}")]
    IntegrityMismatch {
        id: CredentialId,
        /// The digest carried by the payload; None when absent entirely.
        supplied: Option<RecordDigest>,
        computed: RecordDigest,
    },

    /// Input validation failure (empty id, malformed payload).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Underlying substrate read/write failure.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
