//! Rules engine errors
//!
//! Every variant except `Ledger` is a validation failure detected before
//! any mutation. None of them are transient.

use thiserror::Error;

use core_kernel::{Identity, Money, PolicyId};
use domain_ledger::LedgerError;

/// Errors returned by rules engine operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Caller is neither the owner nor a registered insurer
    #[error("Caller {caller} is not an insurer")]
    NotInsurer {
        caller: Identity,
    },

    /// The null identity was supplied
    #[error("The null identity is not allowed")]
    ZeroAddress,

    /// Caller is not the holder of the policy
    #[error("Caller {caller} is not the holder of policy {policy_id}")]
    NotPolicyHolder {
        caller: Identity,
        policy_id: PolicyId,
    },

    /// Payment amount was zero
    #[error("Payment amount must be greater than zero")]
    ZeroValue,

    /// Payment would take the paid total past the premium total
    #[error("Payment of {attempted} on policy {policy_id} exceeds premium: paid {paid} of {total}")]
    PremiumExceeded {
        policy_id: PolicyId,
        paid: Money,
        attempted: Money,
        total: Money,
    },

    /// Policy not found
    #[error("Policy not found: {0}")]
    UnknownPolicy(PolicyId),

    /// Rules engine already bound to the ledger
    #[error("Rules engine already bound")]
    AlreadyBound,

    /// Owner-only operation attempted by someone else
    #[error("Caller {caller} is not the owner")]
    NotOwner {
        caller: Identity,
    },

    /// Any other ledger failure
    #[error("Ledger error: {0}")]
    Ledger(LedgerError),
}

impl PolicyError {
    /// Returns the condition name used as the error discriminant
    pub fn code(&self) -> &'static str {
        match self {
            PolicyError::NotInsurer { .. } => "NotInsurer",
            PolicyError::ZeroAddress => "ZeroAddress",
            PolicyError::NotPolicyHolder { .. } => "NotPolicyHolder",
            PolicyError::ZeroValue => "ZeroValue",
            PolicyError::PremiumExceeded { .. } => "PremiumExceeded",
            PolicyError::UnknownPolicy(_) => "UnknownPolicy",
            PolicyError::AlreadyBound => "AlreadyBound",
            PolicyError::NotOwner { .. } => "NotOwner",
            PolicyError::Ledger(_) => "Ledger",
        }
    }
}

impl From<LedgerError> for PolicyError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnknownPolicy(id) => PolicyError::UnknownPolicy(id),
            LedgerError::AlreadyBound { .. } => PolicyError::AlreadyBound,
            LedgerError::ZeroAddress => PolicyError::ZeroAddress,
            LedgerError::NotOwner { caller } => PolicyError::NotOwner { caller },
            other => PolicyError::Ledger(other),
        }
    }
}
