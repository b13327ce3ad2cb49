//! Ledger domain errors

use core_kernel::{Identity, MoneyError, PolicyId};
use thiserror::Error;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A mutation was attempted by someone other than the bound rules engine
    #[error("Caller {caller} is not the bound rules engine")]
    NotRulesEngine {
        caller: Identity,
    },

    /// A privileged configuration call was made by someone other than the owner
    #[error("Caller {caller} is not the ledger owner")]
    NotOwner {
        caller: Identity,
    },

    /// The rules engine binding has already been made
    #[error("Rules engine already bound to {bound}")]
    AlreadyBound {
        bound: Identity,
    },

    /// The null identity was supplied where a real identity is required
    #[error("The null identity is not allowed here")]
    ZeroAddress,

    /// Policy not found
    #[error("Policy not found: {0}")]
    UnknownPolicy(PolicyId),

    /// A thread panicked while holding the ledger lock
    #[error("Ledger lock poisoned")]
    LockPoisoned,

    /// Arithmetic error on a stored amount
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
