//! Rules engine capability
//!
//! The right to mutate a ledger is carried by a [`RulesEngineCapability`]
//! value rather than by an identity anyone could name. Exactly one is minted
//! per ledger, by a successful [`Ledger::bind_rules_engine`], and it cannot
//! be cloned, copied, deserialized or built outside this crate.
//!
//! ```compile_fail
//! use core_kernel::{Identity, LedgerId};
//! use domain_ledger::RulesEngineCapability;
//!
//! let forged = RulesEngineCapability {
//!     ledger: LedgerId::new_v7(),
//!     identity: Identity::from_bytes([1; 20]),
//! };
//! ```
//!
//! [`Ledger::bind_rules_engine`]: crate::Ledger::bind_rules_engine

use std::fmt;

use core_kernel::{Identity, LedgerId};

/// Proof of being the bound rules engine of one particular ledger
pub struct RulesEngineCapability {
    ledger: LedgerId,
    identity: Identity,
}

impl RulesEngineCapability {
    pub(crate) fn new(ledger: LedgerId, identity: Identity) -> Self {
        Self { ledger, identity }
    }

    /// The identity that was bound as rules engine
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// The ledger this capability was minted by
    pub fn ledger_id(&self) -> LedgerId {
        self.ledger
    }
}

impl fmt::Debug for RulesEngineCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RulesEngineCapability")
            .field("ledger", &self.ledger)
            .field("identity", &self.identity)
            .finish()
    }
}
