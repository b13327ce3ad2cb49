//! Core Kernel - Foundational types for the premium ledger
//!
//! This crate provides the building blocks shared by the ledger and the
//! rules engine:
//! - Opaque caller identities
//! - Non-negative money amounts with precise decimal arithmetic
//! - Policy, ledger and event identifiers
//! - Unix timestamp helpers

pub mod money;
pub mod identity;
pub mod identifiers;
pub mod temporal;
pub mod error;

pub use money::{Money, MoneyError};
pub use identity::{Identity, IdentityError};
pub use identifiers::{PolicyId, LedgerId, EventId};
pub use temporal::{UnixTimestamp, CoveragePeriod};
pub use error::CoreError;
