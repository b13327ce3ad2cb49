//! Pre-built Test Fixtures
//!
//! Fixed identities and amounts so tests read the same way everywhere.

use core_kernel::{Identity, Money};
use rust_decimal_macros::dec;

/// Well-known identities
pub struct IdentityFixtures;

impl IdentityFixtures {
    /// The deployer and ledger owner
    pub fn owner() -> Identity {
        Identity::from_bytes([0xa1; 20])
    }

    /// An identity that will be onboarded as insurer
    pub fn insurer() -> Identity {
        Identity::from_bytes([0xb2; 20])
    }

    /// The holder of issued policies
    pub fn holder() -> Identity {
        Identity::from_bytes([0xc3; 20])
    }

    /// An identity with no role at all
    pub fn stranger() -> Identity {
        Identity::from_bytes([0xd4; 20])
    }

    /// Fixed rules engine identity for deterministic deployments
    pub fn rules_engine() -> Identity {
        Identity::from_bytes([0xe5; 20])
    }
}

/// Standard amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Premium total used by the reference scenario
    pub fn premium_total() -> Money {
        Money::from_units(1000)
    }

    pub fn one() -> Money {
        Money::from_units(1)
    }

    /// A fractional amount for precision checks
    pub fn fractional() -> Money {
        Money::new(dec!(0.3333)).unwrap_or_default()
    }
}

/// Standard policy dates
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn start_date() -> i64 {
        1_000_000_000
    }

    pub fn end_date() -> i64 {
        2_000_000_000
    }

    pub fn installments() -> u32 {
        5
    }
}
