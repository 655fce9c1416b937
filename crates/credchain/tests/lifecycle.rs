//! End-to-end lifecycle tests: issue, share, verify, revoke, and the
//! audit trail, across both organization identities.

use credchain::{
    AuditAction, CredentialId, CredentialStatus, LedgerError, OrgId,
};
use credchain_testkit::{sample_facts, TestFixture};

#[tokio::test]
async fn test_issue_then_read_back() {
    let fx = TestFixture::new();

    let record = fx
        .ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();
    assert_eq!(record.status, CredentialStatus::Issued);
    assert_eq!(record.owner_org, OrgId::Issuer);
    assert_eq!(record.shared_with_org, None);

    let read = fx
        .ledger
        .read_issuer(&fx.issuer_ctx(), &CredentialId::new("C1"))
        .await
        .unwrap();
    assert_eq!(read, record);

    assert!(fx
        .ledger
        .exists(&fx.issuer_ctx(), &CredentialId::new("C1"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_issue_rejects_empty_id() {
    let fx = TestFixture::new();
    let result = fx.ledger.issue(&fx.issuer_ctx(), sample_facts("")).await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));
}

#[tokio::test]
async fn test_duplicate_issue_conflicts_and_preserves_original() {
    let fx = TestFixture::new();
    let original = fx
        .ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();

    let mut altered = sample_facts("C1");
    altered.subject_name = "Mallory".into();
    let result = fx.ledger.issue(&fx.issuer_ctx(), altered).await;
    assert!(matches!(result, Err(LedgerError::Conflict { .. })));

    let read = fx
        .ledger
        .read_issuer(&fx.issuer_ctx(), &CredentialId::new("C1"))
        .await
        .unwrap();
    assert_eq!(read, original);
}

#[tokio::test]
async fn test_share_and_verify_happy_path() {
    let fx = TestFixture::new();
    let record = fx
        .ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();

    // Issuer-side read serialized and handed across the boundary.
    let json = serde_json::to_string(&record).unwrap();
    let shared = fx
        .ledger
        .share_to_verifier(&fx.verifier_ctx(), &json)
        .await
        .unwrap();
    assert_eq!(shared.shared_with_org, Some(OrgId::Verifier));

    let read = fx
        .ledger
        .verify_read(&fx.verifier_ctx(), &CredentialId::new("C1"))
        .await
        .unwrap();
    assert_eq!(read.digest, record.digest);

    let report = fx
        .ledger
        .verify_integrity(&fx.verifier_ctx(), &CredentialId::new("C1"))
        .await
        .unwrap();
    assert!(report.matches);
    assert_eq!(report.stored_digest, record.digest);
    assert_eq!(report.status, CredentialStatus::Issued);
    assert_eq!(report.shared_with_org, Some(OrgId::Verifier));
}

#[tokio::test]
async fn test_tampered_share_rejected_without_write() {
    let fx = TestFixture::new();
    let record = fx
        .ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();

    // One character flipped in an immutable field, digest left stale.
    let mut tampered = record.clone();
    tampered.facts.score = "4.8".into();
    let json = serde_json::to_string(&tampered).unwrap();

    let result = fx.ledger.share_to_verifier(&fx.verifier_ctx(), &json).await;
    assert!(matches!(result, Err(LedgerError::IntegrityMismatch { .. })));

    // Verifier partition untouched.
    let read = fx
        .ledger
        .verify_read(&fx.verifier_ctx(), &CredentialId::new("C1"))
        .await;
    assert!(matches!(read, Err(LedgerError::NotFound { .. })));
}

#[tokio::test]
async fn test_malformed_share_payload_rejected() {
    let fx = TestFixture::new();
    let result = fx
        .ledger
        .share_to_verifier(&fx.verifier_ctx(), "{not json")
        .await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));
}

#[tokio::test]
async fn test_revoke_keeps_digest_and_skips_verifier() {
    let fx = TestFixture::new();
    let record = fx
        .ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();
    let json = serde_json::to_string(&record).unwrap();
    fx.ledger
        .share_to_verifier(&fx.verifier_ctx(), &json)
        .await
        .unwrap();

    let revoked = fx
        .ledger
        .revoke(&fx.issuer_ctx(), &CredentialId::new("C1"))
        .await
        .unwrap();
    assert_eq!(revoked.status, CredentialStatus::Revoked);
    // Status is outside the hash domain.
    assert_eq!(revoked.digest, record.digest);

    // The verifier's copy is stale until an explicit re-share.
    let report = fx
        .ledger
        .verify_integrity(&fx.verifier_ctx(), &CredentialId::new("C1"))
        .await
        .unwrap();
    assert_eq!(report.status, CredentialStatus::Issued);
    assert!(report.matches);
}

#[tokio::test]
async fn test_full_scenario_stale_then_resynced() {
    let fx = TestFixture::new();
    let id = CredentialId::new("C1");

    // Issue, then integrity-check before any share: verifier partition empty.
    fx.ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();
    let early = fx.ledger.verify_integrity(&fx.verifier_ctx(), &id).await;
    assert!(matches!(early, Err(LedgerError::NotFound { .. })));

    // Share: matches, status Issued.
    let record = fx.ledger.read_issuer(&fx.issuer_ctx(), &id).await.unwrap();
    let json = serde_json::to_string(&record).unwrap();
    fx.ledger
        .share_to_verifier(&fx.verifier_ctx(), &json)
        .await
        .unwrap();
    let report = fx
        .ledger
        .verify_integrity(&fx.verifier_ctx(), &id)
        .await
        .unwrap();
    assert!(report.matches);
    assert_eq!(report.status, CredentialStatus::Issued);

    // Revoke issuer-side only: verifier still reports Issued.
    fx.ledger.revoke(&fx.issuer_ctx(), &id).await.unwrap();
    let stale = fx
        .ledger
        .verify_integrity(&fx.verifier_ctx(), &id)
        .await
        .unwrap();
    assert_eq!(stale.status, CredentialStatus::Issued);

    // Re-share the re-read, now-revoked record: verifier sees Revoked.
    let revoked = fx.ledger.read_issuer(&fx.issuer_ctx(), &id).await.unwrap();
    let json = serde_json::to_string(&revoked).unwrap();
    fx.ledger
        .share_to_verifier(&fx.verifier_ctx(), &json)
        .await
        .unwrap();
    let synced = fx
        .ledger
        .verify_integrity(&fx.verifier_ctx(), &id)
        .await
        .unwrap();
    assert_eq!(synced.status, CredentialStatus::Revoked);
    assert!(synced.matches);
}

#[tokio::test]
async fn test_history_records_three_events_in_order() {
    let fx = TestFixture::new();
    let id = CredentialId::new("C1");

    fx.ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();
    let record = fx.ledger.read_issuer(&fx.issuer_ctx(), &id).await.unwrap();
    let json = serde_json::to_string(&record).unwrap();
    fx.ledger
        .share_to_verifier(&fx.verifier_ctx(), &json)
        .await
        .unwrap();
    fx.ledger.revoke(&fx.issuer_ctx(), &id).await.unwrap();

    // History is public: both organizations see the same trail.
    for org in [OrgId::Issuer, OrgId::Verifier] {
        let events = fx.ledger.history(&fx.ctx(org), &id).await.unwrap();
        let actions: Vec<_> = events.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::Issue,
                AuditAction::ShareToVerifier,
                AuditAction::Revoke
            ]
        );
        // Notes are present even when empty.
        assert!(events.iter().all(|e| e.note.is_empty()));
    }
}

#[tokio::test]
async fn test_history_of_unknown_id_is_empty_list() {
    let fx = TestFixture::new();
    let events = fx
        .ledger
        .history(&fx.issuer_ctx(), &CredentialId::new("ghost"))
        .await
        .unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_cross_org_isolation() {
    let fx = TestFixture::new();
    fx.ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();
    let id = CredentialId::new("C1");

    // Issuer may not use the verifier surface, whether or not the record
    // exists there.
    assert!(matches!(
        fx.ledger.verify_read(&fx.issuer_ctx(), &id).await,
        Err(LedgerError::Unauthorized { .. })
    ));
    assert!(matches!(
        fx.ledger.verify_integrity(&fx.issuer_ctx(), &id).await,
        Err(LedgerError::Unauthorized { .. })
    ));
    assert!(matches!(
        fx.ledger
            .share_to_verifier(&fx.issuer_ctx(), "{}")
            .await,
        Err(LedgerError::Unauthorized { .. })
    ));

    // Verifier may not use the issuer surface.
    assert!(matches!(
        fx.ledger.issue(&fx.verifier_ctx(), sample_facts("C2")).await,
        Err(LedgerError::Unauthorized { .. })
    ));
    assert!(matches!(
        fx.ledger.read_issuer(&fx.verifier_ctx(), &id).await,
        Err(LedgerError::Unauthorized { .. })
    ));
    assert!(matches!(
        fx.ledger.revoke(&fx.verifier_ctx(), &id).await,
        Err(LedgerError::Unauthorized { .. })
    ));
    assert!(matches!(
        fx.ledger.exists(&fx.verifier_ctx(), &id).await,
        Err(LedgerError::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn test_share_is_idempotent_on_shared_with_org() {
    let fx = TestFixture::new();
    let record = fx
        .ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();
    let json = serde_json::to_string(&record).unwrap();

    fx.ledger
        .share_to_verifier(&fx.verifier_ctx(), &json)
        .await
        .unwrap();

    // Sharing the already-shared copy again keeps shared_with_org set.
    let shared = fx
        .ledger
        .verify_read(&fx.verifier_ctx(), &CredentialId::new("C1"))
        .await
        .unwrap();
    let json2 = serde_json::to_string(&shared).unwrap();
    let again = fx
        .ledger
        .share_record(
            &fx.verifier_ctx(),
            serde_json::from_str(&json2).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(again.shared_with_org, Some(OrgId::Verifier));
}

#[tokio::test]
async fn test_legacy_format_accepts_legacy_digest() {
    use credchain::{CanonicalFormat, LedgerConfig, RecordDigest};

    let fx = TestFixture::with_config(LedgerConfig::legacy_compatible());
    assert_eq!(
        fx.ledger.canonical_format(),
        CanonicalFormat::LegacyPipeJoined
    );

    let record = fx
        .ledger
        .issue(&fx.issuer_ctx(), sample_facts("C1"))
        .await
        .unwrap();

    // The digest is SHA-256 of the legacy pipe-joined canonical string.
    let expected = RecordDigest::hash(b"C1|S1|Alice|Univ|CS|3.8|2024-01-01");
    assert_eq!(record.digest, expected);

    let json = serde_json::to_string(&record).unwrap();
    fx.ledger
        .share_to_verifier(&fx.verifier_ctx(), &json)
        .await
        .unwrap();
    let report = fx
        .ledger
        .verify_integrity(&fx.verifier_ctx(), &CredentialId::new("C1"))
        .await
        .unwrap();
    assert!(report.matches);
}
