//! Proptest generators for credential facts.
//!
//! Field strategies deliberately include pipe characters and empty
//! strings, the inputs that stress the canonical encodings.

use credchain_core::{CredentialFacts, CredentialId};
use proptest::prelude::*;

/// A single free-form field value: printable text, possibly empty,
/// possibly containing the legacy delimiter.
pub fn field_value() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9 .|-]{0,16}").expect("valid regex")
}

/// A non-empty credential id.
pub fn credential_id() -> impl Strategy<Value = CredentialId> {
    proptest::string::string_regex("[A-Z][A-Z0-9|-]{0,11}")
        .expect("valid regex")
        .prop_map(CredentialId::new)
}

/// Arbitrary credential facts with a non-empty id.
pub fn credential_facts() -> impl Strategy<Value = CredentialFacts> {
    (
        credential_id(),
        field_value(),
        field_value(),
        field_value(),
        field_value(),
        field_value(),
        field_value(),
    )
        .prop_map(
            |(id, subject_id, subject_name, institution, program, score, issue_date)| {
                CredentialFacts {
                    id,
                    subject_id,
                    subject_name,
                    institution,
                    program,
                    score,
                    issue_date,
                }
            },
        )
}
