//! Organization-gated access control.
//!
//! Authorization is a flat capability check: each operation names the one
//! organization allowed to invoke it (or none, for the public audit
//! surface), and the check runs before any store access. The rule table
//! lives in one exhaustive match so it can be audited as data.

use credchain_core::{OrgId, TxContext};

use crate::error::{LedgerError, Result};

/// The operations exposed by the lifecycle engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Issue,
    ReadIssuer,
    ShareToVerifier,
    VerifyRead,
    VerifyIntegrity,
    Revoke,
    History,
    Exists,
}

impl Operation {
    /// The organization required to invoke this operation.
    ///
    /// `None` means any authenticated organization may call it. This is
    /// the authoritative role table for the whole engine.
    pub fn required_org(&self) -> Option<OrgId> {
        match self {
            Operation::Issue => Some(OrgId::Issuer),
            Operation::ReadIssuer => Some(OrgId::Issuer),
            Operation::Revoke => Some(OrgId::Issuer),
            Operation::Exists => Some(OrgId::Issuer),
            Operation::ShareToVerifier => Some(OrgId::Verifier),
            Operation::VerifyRead => Some(OrgId::Verifier),
            Operation::VerifyIntegrity => Some(OrgId::Verifier),
            Operation::History => None,
        }
    }

    /// Stable name for errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Issue => "Issue",
            Operation::ReadIssuer => "ReadIssuer",
            Operation::ShareToVerifier => "ShareToVerifier",
            Operation::VerifyRead => "VerifyRead",
            Operation::VerifyIntegrity => "VerifyIntegrity",
            Operation::Revoke => "Revoke",
            Operation::History => "History",
            Operation::Exists => "Exists",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Check the caller's organization against the operation's requirement.
///
/// Must run before any partition access; a rejected caller learns nothing
/// about whether the target record exists.
pub fn authorize(ctx: &TxContext, op: Operation) -> Result<()> {
    match op.required_org() {
        Some(required) if ctx.org != required => Err(LedgerError::Unauthorized {
            operation: op.name(),
            required,
            actual: ctx.org,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credchain_core::TxId;

    fn ctx(org: OrgId) -> TxContext {
        TxContext::new(TxId::new("tx-1"), 0, org)
    }

    #[test]
    fn test_issuer_operations_reject_verifier() {
        for op in [
            Operation::Issue,
            Operation::ReadIssuer,
            Operation::Revoke,
            Operation::Exists,
        ] {
            assert!(authorize(&ctx(OrgId::Issuer), op).is_ok());
            assert!(matches!(
                authorize(&ctx(OrgId::Verifier), op),
                Err(LedgerError::Unauthorized { required: OrgId::Issuer, .. })
            ));
        }
    }

    #[test]
    fn test_verifier_operations_reject_issuer() {
        for op in [
            Operation::ShareToVerifier,
            Operation::VerifyRead,
            Operation::VerifyIntegrity,
        ] {
            assert!(authorize(&ctx(OrgId::Verifier), op).is_ok());
            assert!(matches!(
                authorize(&ctx(OrgId::Issuer), op),
                Err(LedgerError::Unauthorized { required: OrgId::Verifier, .. })
            ));
        }
    }

    #[test]
    fn test_history_is_public() {
        assert!(authorize(&ctx(OrgId::Issuer), Operation::History).is_ok());
        assert!(authorize(&ctx(OrgId::Verifier), Operation::History).is_ok());
    }
}
