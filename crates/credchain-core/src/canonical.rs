//! Canonical encoding of credential facts for hashing.
//!
//! The canonical form covers exactly the seven immutable facts, in a fixed
//! documented order: id, subject_id, subject_name, institution, program,
//! score, issue_date. Mutable metadata (digest, status, owner_org,
//! shared_with_org) never enters the encoding, so status changes leave the
//! digest untouched.
//!
//! Two formats exist. The default length-prefixes every field, making the
//! encoding injective over fact tuples: no choice of field values can make
//! two distinct records collide. The legacy format reproduces the
//! pipe-joined string of the legacy deployment for byte-for-byte digest
//! compatibility, and inherits its known weakness when a field itself
//! contains a pipe.

use crate::record::CredentialFacts;

/// The legacy field delimiter.
pub const LEGACY_DELIMITER: char = '|';

/// Which canonical encoding a ledger instance uses.
///
/// Both ends of a share must agree on the format, since the verifier
/// recomputes the digest over the supplied facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanonicalFormat {
    /// Each field as u32 big-endian byte length followed by UTF-8 bytes.
    /// Unambiguous; the default.
    #[default]
    LengthPrefixed,
    /// Fields joined with `|`, compatible with digests minted by the
    /// legacy deployment. A field value containing `|` can collide.
    LegacyPipeJoined,
}

/// Encode the facts to canonical bytes under the given format.
pub fn canonical_bytes(facts: &CredentialFacts, format: CanonicalFormat) -> Vec<u8> {
    match format {
        CanonicalFormat::LengthPrefixed => length_prefixed_bytes(facts),
        CanonicalFormat::LegacyPipeJoined => legacy_string(facts).into_bytes(),
    }
}

/// The legacy pipe-joined canonical string.
pub fn legacy_string(facts: &CredentialFacts) -> String {
    let mut out = String::new();
    for (i, field) in fields_in_order(facts).iter().enumerate() {
        if i > 0 {
            out.push(LEGACY_DELIMITER);
        }
        out.push_str(field);
    }
    out
}

fn length_prefixed_bytes(facts: &CredentialFacts) -> Vec<u8> {
    let fields = fields_in_order(facts);
    let total: usize = fields.iter().map(|f| 4 + f.len()).sum();
    let mut buf = Vec::with_capacity(total);
    for field in fields {
        encode_field(&mut buf, field);
    }
    buf
}

/// Append one field: u32 big-endian byte length, then the UTF-8 bytes.
fn encode_field(buf: &mut Vec<u8>, field: &str) {
    buf.extend_from_slice(&(field.len() as u32).to_be_bytes());
    buf.extend_from_slice(field.as_bytes());
}

/// The fixed hashing order. Changing this order changes every digest.
fn fields_in_order(facts: &CredentialFacts) -> [&str; 7] {
    [
        facts.id.as_str(),
        &facts.subject_id,
        &facts.subject_name,
        &facts.institution,
        &facts.program,
        &facts.score,
        &facts.issue_date,
    ]
}
