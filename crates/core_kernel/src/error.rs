//! Core error types used across the system

use thiserror::Error;
use crate::identity::IdentityError;
use crate::money::MoneyError;

/// Malformed kernel input, such as an identity or amount given as text
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),
}

impl CoreError {
    /// Short name of the failing input kind
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Money(_) => "InvalidAmount",
            CoreError::Identity(_) => "InvalidIdentity",
        }
    }
}
