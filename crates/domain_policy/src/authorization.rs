//! Role-based authorization
//!
//! `AuthorizationPolicy` is the one place that decides who may do what.
//! The rules engine consults it with a view of the ledger, which remains the
//! source of truth for the owner identity and the insurer roster.

use serde::{Deserialize, Serialize};

use core_kernel::{Identity, PolicyId};
use domain_ledger::{Ledger, Policy};
use crate::error::PolicyError;

/// The role a caller holds with respect to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The identity that initialized the ledger
    Owner,
    /// A registered insurer
    Insurer,
    /// Anyone else
    Other,
}

impl Role {
    /// Owners and insurers may issue policies
    pub fn can_issue(&self) -> bool {
        matches!(self, Role::Owner | Role::Insurer)
    }
}

/// Who may add identities to the insurer roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingPolicy {
    /// Any caller may onboard any identity, including themselves
    #[default]
    Open,
    /// Only the ledger owner may onboard
    OwnerOnly,
}

/// Authorization rules consulted by the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthorizationPolicy {
    onboarding: OnboardingPolicy,
}

impl AuthorizationPolicy {
    pub fn new(onboarding: OnboardingPolicy) -> Self {
        Self { onboarding }
    }

    /// Resolves the caller's role
    ///
    /// The owner outranks the roster: an owner who is also onboarded as an
    /// insurer is still `Owner`.
    pub fn role_of(&self, ledger: &Ledger, caller: &Identity) -> Role {
        if *caller == ledger.owner() {
            Role::Owner
        } else if ledger.is_insurer(caller) {
            Role::Insurer
        } else {
            Role::Other
        }
    }

    /// Checks that `caller` may onboard `insurer`
    pub fn authorize_onboarding(
        &self,
        ledger: &Ledger,
        caller: &Identity,
        insurer: &Identity,
    ) -> Result<(), PolicyError> {
        if self.onboarding == OnboardingPolicy::OwnerOnly
            && self.role_of(ledger, caller) != Role::Owner
        {
            return Err(PolicyError::NotOwner { caller: *caller });
        }
        if insurer.is_zero() {
            return Err(PolicyError::ZeroAddress);
        }
        Ok(())
    }

    /// Checks that `caller` may issue a policy to `holder`
    pub fn authorize_issuance(
        &self,
        ledger: &Ledger,
        caller: &Identity,
        holder: &Identity,
    ) -> Result<(), PolicyError> {
        if !self.role_of(ledger, caller).can_issue() {
            return Err(PolicyError::NotInsurer { caller: *caller });
        }
        if holder.is_zero() {
            return Err(PolicyError::ZeroAddress);
        }
        Ok(())
    }

    /// Checks that `caller` may pay into `policy`
    pub fn authorize_payment(
        &self,
        policy_id: PolicyId,
        policy: &Policy,
        caller: &Identity,
    ) -> Result<(), PolicyError> {
        if policy.holder != *caller {
            return Err(PolicyError::NotPolicyHolder {
                caller: *caller,
                policy_id,
            });
        }
        Ok(())
    }
}
