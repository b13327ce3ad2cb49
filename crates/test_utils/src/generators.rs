//! Property-Based Test Generators
//!
//! Provides proptest strategies for identities, amounts and caller mixes.

use core_kernel::{Identity, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::IdentityFixtures;

/// Strategy for arbitrary non-null identities
pub fn identity_strategy() -> impl Strategy<Value = Identity> {
    any::<[u8; 20]>()
        .prop_filter("null identity", |bytes| bytes.iter().any(|b| *b != 0))
        .prop_map(Identity::from_bytes)
}

/// Strategy for amounts in minor units
pub fn amount_minor_strategy() -> impl Strategy<Value = u64> {
    0u64..1_000_000u64
}

/// Strategy for Money values, zero included
pub fn money_strategy() -> impl Strategy<Value = Money> {
    amount_minor_strategy().prop_map(Money::from_minor)
}

/// Strategy for Money values with four decimal places
pub fn precise_money_strategy() -> impl Strategy<Value = Money> {
    (0i64..100_000_000i64).prop_map(|n| Money::new(Decimal::new(n, 4)).unwrap_or_default())
}

/// Strategy picking one of the fixture identities
pub fn fixture_caller_strategy() -> impl Strategy<Value = Identity> {
    prop_oneof![
        Just(IdentityFixtures::owner()),
        Just(IdentityFixtures::insurer()),
        Just(IdentityFixtures::holder()),
        Just(IdentityFixtures::stranger()),
    ]
}

/// Strategy for a sequence of (caller, amount) payment attempts
pub fn payment_attempts_strategy(max_len: usize) -> impl Strategy<Value = Vec<(Identity, Money)>> {
    proptest::collection::vec((fixture_caller_strategy(), money_strategy()), 0..max_len)
}
