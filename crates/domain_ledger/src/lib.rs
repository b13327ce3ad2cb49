//! Ledger Domain - Durable Policy and Authorization State
//!
//! This crate holds the single source of truth for who owns the system,
//! which identities are insurers, and every policy with its premium
//! progress.
//!
//! # Capability Model
//!
//! The ledger knows exactly one trusted mutator, the rules engine, bound
//! once after initialization by the owner. The binding mints a
//! [`RulesEngineCapability`]; every mutating call takes it and is refused
//! unless it was minted by that same ledger. Reads are open to anyone.
//!
//! The ledger performs no business validation. Role checks and the
//! `premium_paid <= premium_total` invariant are enforced by the rules
//! engine before it calls in here.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{LedgerHandle, NewPolicy};
//!
//! let ledger = LedgerHandle::initialize(owner);
//! let capability = ledger.bind_rules_engine(&owner, engine)?;
//!
//! let id = ledger.transact(|l| l.create_policy(&capability, new_policy))?;
//! ```

pub mod capability;
pub mod ledger;
pub mod policy;
pub mod handle;
pub mod error;

pub use ledger::Ledger;
pub use policy::{Policy, NewPolicy, PaymentStatus};
pub use capability::RulesEngineCapability;
pub use handle::{LedgerHandle, LedgerTxn};
pub use error::LedgerError;
