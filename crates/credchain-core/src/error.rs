//! Error types for Credchain core primitives.

use thiserror::Error;

/// Validation failures on record input.
///
/// These are caller-fixable: the input must change before a retry can
/// succeed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("credential id is required and must be non-empty")]
    EmptyId,

    #[error("credential payload is not valid JSON: {0}")]
    InvalidPayload(String),
}
