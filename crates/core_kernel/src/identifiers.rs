//! Strongly-typed identifiers for domain entities
//!
//! Policies are addressed by their insertion index in the ledger, so
//! `PolicyId` wraps a `u64`. Ledgers and events use time-ordered UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }
    };
}

define_id!(LedgerId, "LED");
define_id!(EventId, "EVT");

/// Position of a policy in the ledger's policy sequence
///
/// Assigned from 0 upwards in insertion order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(u64);

impl PolicyId {
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the index usable against a `Vec`, if it fits in `usize`
    pub fn index(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POL-{}", self.0)
    }
}

impl FromStr for PolicyId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("POL-").unwrap_or(s);
        Ok(Self(digits.parse()?))
    }
}

impl From<u64> for PolicyId {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

impl From<PolicyId> for u64 {
    fn from(id: PolicyId) -> u64 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_id_display() {
        assert_eq!(PolicyId::new(7).to_string(), "POL-7");
    }

    #[test]
    fn test_policy_id_parsing() {
        assert_eq!("POL-42".parse::<PolicyId>().unwrap(), PolicyId::new(42));
        assert_eq!("3".parse::<PolicyId>().unwrap(), PolicyId::new(3));
        assert!("POL-x".parse::<PolicyId>().is_err());
    }

    #[test]
    fn test_ledger_ids_are_distinct() {
        let first = LedgerId::new_v7();
        let second = LedgerId::new_v7();
        assert_ne!(first, second);
        assert!(first.to_string().starts_with("LED-"));
    }

    #[test]
    fn test_event_id_parsing() {
        let original = EventId::new_v7();
        let parsed: EventId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
        assert!(original.to_string().starts_with("EVT-"));
    }
}
