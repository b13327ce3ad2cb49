//! Money types with precise decimal arithmetic
//!
//! The ledger keeps a single unit of account, so `Money` carries no
//! currency. Amounts are never negative: a premium total, a paid total and a
//! payment are all quantities of value actually held or owed.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Decimal places kept internally
const INTERNAL_DP: u32 = 4;

/// Decimal places of the minor unit (cents)
const MINOR_DP: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Negative amount: {0}")]
    NegativeAmount(Decimal),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Overflow during calculation")]
    Overflow,

    #[error("Subtraction would produce a negative amount")]
    Underflow,
}

/// A non-negative monetary amount
///
/// Money uses rust_decimal for precise arithmetic without floating-point errors.
/// Amounts are stored with 4 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value, rejecting negative amounts
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::NegativeAmount(amount));
        }
        if amount.is_zero() {
            return Ok(Self::zero());
        }
        Ok(Self {
            amount: amount.round_dp(INTERNAL_DP),
        })
    }

    /// Creates Money from a whole number of units
    pub fn from_units(units: u64) -> Self {
        Self {
            amount: Decimal::from(units),
        }
    }

    /// Creates Money from an integer amount in minor units (cents)
    pub fn from_minor(minor_units: u64) -> Self {
        Self {
            amount: Decimal::from(minor_units) / dec!(100),
        }
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self { amount: dec!(0) }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        !self.amount.is_zero()
    }

    /// Checked addition
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self { amount })
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction, failing rather than going below zero
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if other.amount > self.amount {
            return Err(MoneyError::Underflow);
        }
        Ok(Self {
            amount: self.amount - other.amount,
        })
    }

    /// Splits the amount into `n` equal parts at cent precision
    ///
    /// Remainder cents go to the first allocations so the parts always sum
    /// to the cent-rounded original.
    pub fn allocate(&self, n: u32) -> Result<Vec<Money>, MoneyError> {
        if n == 0 {
            return Err(MoneyError::InvalidAmount("Cannot allocate to zero parts".to_string()));
        }

        let total_minor = (self.amount * dec!(100))
            .round()
            .to_u64()
            .ok_or(MoneyError::Overflow)?;

        let base_amount = total_minor / u64::from(n);
        let remainder = total_minor % u64::from(n);

        let allocations = (0..u64::from(n))
            .map(|i| {
                let minor = if i < remainder { base_amount + 1 } else { base_amount };
                Money::from_minor(minor)
            })
            .collect();

        Ok(allocations)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalized = self.amount.normalize();
        if normalized.scale() > MINOR_DP {
            write!(f, "{}", normalized)
        } else {
            write!(f, "{:.dp$}", normalized, dp = MINOR_DP as usize)
        }
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| MoneyError::InvalidAmount(format!("{}: {}", s, e)))?;
        Money::new(amount)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Money::new(amount)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::new(amount).map_err(serde::de::Error::custom)
    }
}
