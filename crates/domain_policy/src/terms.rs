//! Terms supplied when issuing a policy

use serde::{Deserialize, Serialize};

use core_kernel::temporal::UnixTimestamp;
use core_kernel::{Identity, Money};

/// Caller-supplied terms for a new policy
///
/// Dates and installments are accepted as given; no cross-field validation
/// is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTerms {
    pub holder: Identity,
    pub start_date: UnixTimestamp,
    pub end_date: UnixTimestamp,
    pub installments: u32,
    /// Contracted premium; payments can never exceed it
    pub premium_total: Money,
}

impl PolicyTerms {
    pub fn new(
        holder: Identity,
        start_date: UnixTimestamp,
        end_date: UnixTimestamp,
        installments: u32,
        premium_total: Money,
    ) -> Self {
        Self {
            holder,
            start_date,
            end_date,
            installments,
            premium_total,
        }
    }
}
