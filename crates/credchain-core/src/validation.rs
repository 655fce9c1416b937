//! Input validation for credential facts and record payloads.

use crate::error::ValidationError;
use crate::record::{CredentialFacts, CredentialRecord};

/// Validate facts supplied to an issue operation.
///
/// The credential id must be non-empty; all other facts are free-form and
/// accepted as-is.
pub fn validate_facts(facts: &CredentialFacts) -> Result<(), ValidationError> {
    if facts.id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    Ok(())
}

/// Parse and validate a record payload from its JSON wire form.
///
/// Used by the share operation, which receives a whole serialized record
/// rather than an id. The partitions have no cross-organization read
/// channel, so the record travels by value.
pub fn parse_record_json(json: &str) -> Result<CredentialRecord, ValidationError> {
    let record: CredentialRecord =
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidPayload(e.to_string()))?;
    if record.id().is_empty() {
        return Err(ValidationError::EmptyId);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalFormat;
    use crate::digest::digest;
    use crate::types::{CredentialId, OrgId};

    fn facts(id: &str) -> CredentialFacts {
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

    #[test]
    fn test_empty_id_rejected() {
        assert_eq!(validate_facts(&facts("")), Err(ValidationError::EmptyId));
        assert!(validate_facts(&facts("C1")).is_ok());
    }

    #[test]
    fn test_parse_record_json_roundtrip() {
        let f = facts("C1");
        let d = digest(&f, CanonicalFormat::LengthPrefixed);
        let record = CredentialRecord::issued(f, d, OrgId::Issuer);

        let json = serde_json::to_string(&record).unwrap();
        let parsed = parse_record_json(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_parse_record_json_rejects_garbage() {
        assert!(matches!(
            parse_record_json("not json"),
            Err(ValidationError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_parse_record_json_rejects_empty_id() {
        let f = facts("");
        let d = digest(&f, CanonicalFormat::LengthPrefixed);
        let record = CredentialRecord::issued(f, d, OrgId::Issuer);
        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(parse_record_json(&json), Err(ValidationError::EmptyId));
    }
}
