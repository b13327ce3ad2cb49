//! Tests for the rules engine
//!
//! Tests cover insurer onboarding, policy issuance, premium payment
//! validation, and the events emitted for each accepted request.

use core_kernel::{Identity, Money, PolicyId};
use domain_ledger::PaymentStatus;
use domain_policy::{OnboardingPolicy, PolicyError, PolicyEvent};
use rust_decimal_macros::dec;
use test_utils::{
    assert_event_count, assert_last_event, assert_premium_paid, assert_rejected,
    IdentityFixtures, MoneyFixtures, PolicyTermsBuilder, TestSystem, TestSystemBuilder,
};

fn system_with_insurer() -> TestSystem {
    TestSystemBuilder::new()
        .with_insurer(IdentityFixtures::insurer())
        .build()
}

fn issue_default_policy(system: &TestSystem) -> PolicyId {
    system
        .engine
        .issue_policy(&IdentityFixtures::insurer(), PolicyTermsBuilder::new().build())
        .unwrap()
}

// ============================================================================
// Onboarding Tests
// ============================================================================

mod onboarding_tests {
    use super::*;

    #[test]
    fn test_insurer_unknown_until_onboarded() {
        let system = TestSystemBuilder::new().build();
        let insurer = IdentityFixtures::insurer();

        assert!(!system.engine.ledger().is_insurer(&insurer).unwrap());

        let added = system.engine.onboard_insurer(&system.owner, insurer).unwrap();
        assert!(added);
        assert!(system.engine.ledger().is_insurer(&insurer).unwrap());
        assert_last_event(&system.events, &PolicyEvent::InsurerOnboarded { insurer });
    }

    #[test]
    fn test_self_onboarding_is_open_by_default() {
        let system = TestSystemBuilder::new().build();
        let stranger = IdentityFixtures::stranger();

        assert!(system.engine.onboard_insurer(&stranger, stranger).unwrap());
        assert!(system.engine.ledger().is_insurer(&stranger).unwrap());
    }

    #[test]
    fn test_repeat_onboarding_is_idempotent() {
        let system = system_with_insurer();
        assert_event_count(&system.events, 1);

        let added = system
            .engine
            .onboard_insurer(&system.owner, IdentityFixtures::insurer())
            .unwrap();

        assert!(!added);
        assert!(system.engine.ledger().is_insurer(&IdentityFixtures::insurer()).unwrap());
        assert_eq!(system.engine.ledger().read(|l| l.insurer_count()).unwrap(), 1);
        assert_event_count(&system.events, 1);
    }

    #[test]
    fn test_null_insurer_rejected() {
        let system = TestSystemBuilder::new().build();

        assert_rejected(
            system.engine.onboard_insurer(&system.owner, Identity::ZERO),
            "ZeroAddress",
        );
        assert!(system.events.is_empty());
    }

    #[test]
    fn test_owner_only_rejects_other_callers() {
        let system = TestSystemBuilder::new()
            .with_onboarding_policy(OnboardingPolicy::OwnerOnly)
            .build();
        let stranger = IdentityFixtures::stranger();

        assert_rejected(system.engine.onboard_insurer(&stranger, stranger), "NotOwner");
        assert!(!system.engine.ledger().is_insurer(&stranger).unwrap());
        assert!(system.events.is_empty());
    }

    #[test]
    fn test_owner_only_accepts_owner() {
        let system = TestSystemBuilder::new()
            .with_onboarding_policy(OnboardingPolicy::OwnerOnly)
            .build();

        let added = system
            .engine
            .onboard_insurer(&system.owner, IdentityFixtures::insurer())
            .unwrap();
        assert!(added);
    }

    #[test]
    fn test_owner_only_checks_caller_before_identity() {
        let system = TestSystemBuilder::new()
            .with_onboarding_policy(OnboardingPolicy::OwnerOnly)
            .build();

        assert_rejected(
            system
                .engine
                .onboard_insurer(&IdentityFixtures::stranger(), Identity::ZERO),
            "NotOwner",
        );
    }
}

// ============================================================================
// Issuance Tests
// ============================================================================

mod issuance_tests {
    use super::*;

    #[test]
    fn test_non_insurer_cannot_issue() {
        let system = TestSystemBuilder::new().build();

        let result = system
            .engine
            .issue_policy(&IdentityFixtures::stranger(), PolicyTermsBuilder::new().build());

        assert_eq!(
            result,
            Err(PolicyError::NotInsurer {
                caller: IdentityFixtures::stranger()
            })
        );
        assert_eq!(system.engine.ledger().read(|l| l.policy_count()).unwrap(), 0);
        assert!(system.events.is_empty());
    }

    #[test]
    fn test_null_holder_rejected_for_insurer_and_owner() {
        let system = system_with_insurer();
        let terms = PolicyTermsBuilder::new().holder(Identity::ZERO).build();

        assert_rejected(
            system.engine.issue_policy(&IdentityFixtures::insurer(), terms.clone()),
            "ZeroAddress",
        );
        assert_rejected(system.engine.issue_policy(&system.owner, terms), "ZeroAddress");
        assert_eq!(system.engine.ledger().read(|l| l.policy_count()).unwrap(), 0);
    }

    #[test]
    fn test_policy_ids_are_sequential() {
        let system = system_with_insurer();

        let first = issue_default_policy(&system);
        let second = issue_default_policy(&system);
        let third = issue_default_policy(&system);

        assert_eq!(first, PolicyId::new(0));
        assert_eq!(second, PolicyId::new(1));
        assert_eq!(third, PolicyId::new(2));
        // One onboarding plus three issuances
        assert_event_count(&system.events, 4);
    }

    #[test]
    fn test_issued_policy_records_terms() {
        let system = system_with_insurer();
        let terms = PolicyTermsBuilder::new()
            .dates(10, 20)
            .installments(12)
            .premium_total(Money::from_units(600))
            .build();

        let id = system
            .engine
            .issue_policy(&IdentityFixtures::insurer(), terms)
            .unwrap();
        let policy = system.engine.ledger().get_policy(id).unwrap();

        assert_eq!(policy.holder, IdentityFixtures::holder());
        assert_eq!(policy.issuer, IdentityFixtures::insurer());
        assert_eq!(policy.start_date, 10);
        assert_eq!(policy.end_date, 20);
        assert_eq!(policy.installments, 12);
        assert_eq!(policy.premium_total, Money::from_units(600));
        assert!(policy.premium_paid().is_zero());
        assert_eq!(policy.payment_status(), PaymentStatus::Created);

        assert_last_event(
            &system.events,
            &PolicyEvent::PolicyIssued {
                holder: IdentityFixtures::holder(),
                start_date: 10,
                end_date: 20,
                installments: 12,
            },
        );
    }

    #[test]
    fn test_dates_are_not_validated() {
        let system = system_with_insurer();
        let terms = PolicyTermsBuilder::new().dates(500, 100).installments(0).build();

        let id = system
            .engine
            .issue_policy(&IdentityFixtures::insurer(), terms)
            .unwrap();
        let policy = system.engine.ledger().get_policy(id).unwrap();
        assert_eq!(policy.start_date, 500);
        assert_eq!(policy.end_date, 100);
    }

    #[test]
    fn test_policies_held_by_holder() {
        let system = system_with_insurer();
        let first = issue_default_policy(&system);
        system
            .engine
            .issue_policy(
                &IdentityFixtures::insurer(),
                PolicyTermsBuilder::new().holder(IdentityFixtures::stranger()).build(),
            )
            .unwrap();
        let third = issue_default_policy(&system);

        let held = system
            .engine
            .ledger()
            .read(|l| l.policies_held_by(&IdentityFixtures::holder()))
            .unwrap();
        assert_eq!(held, vec![first, third]);
    }
}

// ============================================================================
// Payment Tests
// ============================================================================

mod payment_tests {
    use super::*;

    #[test]
    fn test_payment_adds_exact_amount() {
        let system = system_with_insurer();
        let id = issue_default_policy(&system);
        let holder = IdentityFixtures::holder();

        let receipt = system
            .engine
            .pay_premium(&holder, id, Money::from_units(250))
            .unwrap();

        assert_eq!(receipt.premium_paid, Money::from_units(250));
        assert_eq!(receipt.outstanding, Money::from_units(750));
        assert_eq!(receipt.status, PaymentStatus::PartiallyPaid);
        assert_premium_paid(system.engine.ledger(), id, Money::from_units(250));
        assert_last_event(
            &system.events,
            &PolicyEvent::PremiumPaid {
                policy_id: id,
                payer: holder,
                holder,
                amount: Money::from_units(250),
            },
        );
    }

    #[test]
    fn test_non_holder_cannot_pay() {
        let system = system_with_insurer();
        let id = issue_default_policy(&system);
        let events_before = system.events.len();

        for caller in [
            system.owner,
            IdentityFixtures::insurer(),
            IdentityFixtures::stranger(),
        ] {
            assert_rejected(
                system.engine.pay_premium(&caller, id, MoneyFixtures::one()),
                "NotPolicyHolder",
            );
        }

        assert_premium_paid(system.engine.ledger(), id, Money::zero());
        assert_event_count(&system.events, events_before);
    }

    #[test]
    fn test_zero_payment_rejected() {
        let system = system_with_insurer();
        let id = issue_default_policy(&system);

        assert_rejected(
            system
                .engine
                .pay_premium(&IdentityFixtures::holder(), id, Money::zero()),
            "ZeroValue",
        );
        assert_premium_paid(system.engine.ledger(), id, Money::zero());
    }

    #[test]
    fn test_holder_check_precedes_zero_check() {
        let system = system_with_insurer();
        let id = issue_default_policy(&system);

        assert_rejected(
            system
                .engine
                .pay_premium(&IdentityFixtures::stranger(), id, Money::zero()),
            "NotPolicyHolder",
        );
    }

    #[test]
    fn test_overpayment_rejected_without_change() {
        let system = system_with_insurer();
        let id = issue_default_policy(&system);
        let holder = IdentityFixtures::holder();

        system
            .engine
            .pay_premium(&holder, id, Money::from_units(900))
            .unwrap();

        let result = system.engine.pay_premium(&holder, id, Money::from_units(101));
        assert_eq!(
            result,
            Err(PolicyError::PremiumExceeded {
                policy_id: id,
                paid: Money::from_units(900),
                attempted: Money::from_units(101),
                total: Money::from_units(1000),
            })
        );
        assert_premium_paid(system.engine.ledger(), id, Money::from_units(900));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let system = system_with_insurer();

        assert_rejected(
            system
                .engine
                .pay_premium(&IdentityFixtures::holder(), PolicyId::new(42), MoneyFixtures::one()),
            "UnknownPolicy",
        );
    }

    #[test]
    fn test_fractional_payments_accumulate() {
        let system = system_with_insurer();
        let terms = PolicyTermsBuilder::new()
            .premium_total(Money::from_units(1))
            .build();
        let id = system
            .engine
            .issue_policy(&IdentityFixtures::insurer(), terms)
            .unwrap();
        let holder = IdentityFixtures::holder();

        for _ in 0..3 {
            system
                .engine
                .pay_premium(&holder, id, MoneyFixtures::fractional())
                .unwrap();
        }

        assert_premium_paid(system.engine.ledger(), id, Money::new(dec!(0.9999)).unwrap());
        let policy = system.engine.ledger().get_policy(id).unwrap();
        assert_eq!(policy.payment_status(), PaymentStatus::PartiallyPaid);
    }

    #[test]
    fn test_total_premium_collected_spans_policies() {
        let system = system_with_insurer();
        let first = issue_default_policy(&system);
        let second = issue_default_policy(&system);
        let holder = IdentityFixtures::holder();

        system.engine.pay_premium(&holder, first, Money::from_units(100)).unwrap();
        system.engine.pay_premium(&holder, second, Money::from_units(50)).unwrap();

        let collected = system
            .engine
            .ledger()
            .read(|l| l.total_premium_collected())
            .unwrap()
            .unwrap();
        assert_eq!(collected, Money::from_units(150));
    }
}
