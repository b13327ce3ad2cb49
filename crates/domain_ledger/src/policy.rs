//! Policy records held by the ledger

use serde::{Deserialize, Serialize};

use core_kernel::temporal::{CoveragePeriod, UnixTimestamp};
use core_kernel::{Identity, Money};

/// Payment progress of a policy, derived from its paid and total amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Nothing paid yet
    Created,
    /// Some but not all of the premium paid
    PartiallyPaid,
    /// Premium paid in full
    FullyPaid,
}

/// Fields supplied when a policy is appended to the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPolicy {
    pub holder: Identity,
    pub issuer: Identity,
    pub start_date: UnixTimestamp,
    pub end_date: UnixTimestamp,
    pub installments: u32,
    pub premium_total: Money,
}

/// A holder's insurance contract and its running premium total
///
/// Instances are only ever produced by the ledger. `premium_paid` starts at
/// zero and only the ledger's `record_payment` changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// The only identity permitted to pay premiums
    pub holder: Identity,
    /// Who created the policy; kept for audit
    pub issuer: Identity,
    pub start_date: UnixTimestamp,
    pub end_date: UnixTimestamp,
    /// Number of expected premium installments
    pub installments: u32,
    pub premium_total: Money,
    premium_paid: Money,
}

impl Policy {
    pub(crate) fn from_new(new: NewPolicy) -> Self {
        Self {
            holder: new.holder,
            issuer: new.issuer,
            start_date: new.start_date,
            end_date: new.end_date,
            installments: new.installments,
            premium_total: new.premium_total,
            premium_paid: Money::zero(),
        }
    }

    pub(crate) fn set_premium_paid(&mut self, amount: Money) {
        self.premium_paid = amount;
    }

    /// Total premium received so far
    pub fn premium_paid(&self) -> Money {
        self.premium_paid
    }

    /// Premium still owed; zero if fully paid
    pub fn outstanding(&self) -> Money {
        self.premium_total
            .checked_sub(&self.premium_paid)
            .unwrap_or_else(|_| Money::zero())
    }

    /// Derives the payment status from the paid and total amounts
    pub fn payment_status(&self) -> PaymentStatus {
        if self.premium_paid >= self.premium_total {
            PaymentStatus::FullyPaid
        } else if self.premium_paid.is_zero() {
            PaymentStatus::Created
        } else {
            PaymentStatus::PartiallyPaid
        }
    }

    /// Splits the premium total into the expected installments
    ///
    /// Cents that do not divide evenly go to the earliest installments.
    /// Returns an empty schedule when no installments are expected.
    pub fn installment_schedule(&self) -> Vec<Money> {
        self.premium_total
            .allocate(self.installments)
            .unwrap_or_default()
    }

    /// Coverage window as dates, if both timestamps are representable
    pub fn coverage_period(&self) -> Option<CoveragePeriod> {
        CoveragePeriod::from_timestamps(self.start_date, self.end_date)
    }

    /// Returns true if `at` falls within `[start_date, end_date)`
    pub fn is_in_effect_at(&self, at: UnixTimestamp) -> bool {
        self.start_date <= at && at < self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(total: u64, installments: u32) -> Policy {
        Policy::from_new(NewPolicy {
            holder: Identity::from_bytes([1; 20]),
            issuer: Identity::from_bytes([2; 20]),
            start_date: 1_000_000_000,
            end_date: 2_000_000_000,
            installments,
            premium_total: Money::from_units(total),
        })
    }

    #[test]
    fn test_new_policy_starts_unpaid() {
        let policy = sample(1000, 5);
        assert!(policy.premium_paid().is_zero());
        assert_eq!(policy.payment_status(), PaymentStatus::Created);
        assert_eq!(policy.outstanding(), Money::from_units(1000));
    }

    #[test]
    fn test_payment_status_progression() {
        let mut policy = sample(1000, 5);

        policy.set_premium_paid(Money::from_units(1));
        assert_eq!(policy.payment_status(), PaymentStatus::PartiallyPaid);

        policy.set_premium_paid(Money::from_units(1000));
        assert_eq!(policy.payment_status(), PaymentStatus::FullyPaid);
        assert!(policy.outstanding().is_zero());
    }

    #[test]
    fn test_zero_total_is_fully_paid() {
        let policy = sample(0, 1);
        assert_eq!(policy.payment_status(), PaymentStatus::FullyPaid);
    }

    #[test]
    fn test_installment_schedule() {
        let schedule = sample(1000, 3).installment_schedule();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0], Money::from_minor(33334));
        assert_eq!(schedule[1], Money::from_minor(33333));

        assert!(sample(1000, 0).installment_schedule().is_empty());
    }

    #[test]
    fn test_in_effect_window() {
        let policy = sample(1000, 5);
        assert!(!policy.is_in_effect_at(999_999_999));
        assert!(policy.is_in_effect_at(1_000_000_000));
        assert!(!policy.is_in_effect_at(2_000_000_000));
        assert!(policy.coverage_period().is_some());
    }
}
