//! The rules engine
//!
//! Translates caller intent into validated ledger mutations. Each operation
//! runs inside a single [`LedgerHandle::transact`] call: validation, the
//! ledger mutation and event emission happen under one lock, so either all
//! of them happen or none do.
//!
//! # Example
//!
//! ```rust,ignore
//! let capability = ledger.bind_rules_engine(&owner, engine_id)?;
//! let engine = RulesEngine::new(ledger, capability, RulesEngineConfig::default(), sink);
//!
//! engine.onboard_insurer(&insurer, insurer)?;
//! let id = engine.issue_policy(&insurer, terms)?;
//! let receipt = engine.pay_premium(&holder, id, Money::from_units(1))?;
//! assert_eq!(receipt.status, PaymentStatus::PartiallyPaid);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use core_kernel::{Identity, Money, PolicyId};
use domain_ledger::{LedgerHandle, NewPolicy, PaymentStatus, RulesEngineCapability};
use crate::authorization::AuthorizationPolicy;
use crate::config::RulesEngineConfig;
use crate::error::PolicyError;
use crate::events::{EventSink, PolicyEvent};
use crate::terms::PolicyTerms;

/// Outcome of an accepted premium payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub policy_id: PolicyId,
    /// Amount accepted by this call
    pub amount: Money,
    /// Paid total after this call
    pub premium_paid: Money,
    /// Premium still owed after this call
    pub outstanding: Money,
    pub status: PaymentStatus,
}

/// Gatekeeper and sole mutator of the ledger
///
/// Cloning is cheap and clones share the ledger, the capability and the
/// event sink. The capability never leaves the engine.
#[derive(Clone)]
pub struct RulesEngine {
    capability: Arc<RulesEngineCapability>,
    ledger: LedgerHandle,
    authorization: AuthorizationPolicy,
    events: Arc<dyn EventSink>,
}

impl RulesEngine {
    /// Creates a rules engine mutating `ledger` with `capability`
    ///
    /// The ledger accepts the engine's mutations only if `capability` was
    /// minted by binding that same ledger.
    pub fn new(
        ledger: LedgerHandle,
        capability: RulesEngineCapability,
        config: RulesEngineConfig,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            capability: Arc::new(capability),
            ledger,
            authorization: AuthorizationPolicy::new(config.onboarding_policy),
            events,
        }
    }

    /// The identity this engine presents to the ledger
    pub fn identity(&self) -> Identity {
        self.capability.identity()
    }

    /// Read access to the underlying ledger
    pub fn ledger(&self) -> &LedgerHandle {
        &self.ledger
    }

    /// Adds `insurer` to the insurer roster
    ///
    /// Onboarding an existing insurer changes nothing and emits no event.
    ///
    /// # Returns
    ///
    /// True if the insurer was newly added
    ///
    /// # Errors
    ///
    /// - `NotOwner` when onboarding is restricted to the owner
    /// - `ZeroAddress` if `insurer` is the null identity
    pub fn onboard_insurer(&self, caller: &Identity, insurer: Identity) -> Result<bool, PolicyError> {
        let result: Result<bool, PolicyError> = self.ledger.transact(|ledger| {
            self.authorization.authorize_onboarding(ledger, caller, &insurer)?;

            let added = ledger.register_insurer(&self.capability, insurer)?;
            if added {
                self.events.emit(&PolicyEvent::InsurerOnboarded { insurer });
            }
            Ok(added)
        });

        match &result {
            Ok(added) => tracing::info!(%caller, %insurer, added, "Insurer onboarded"),
            Err(e) => rejected("onboard_insurer", caller, e),
        }
        result
    }

    /// Issues a new policy with `caller` recorded as issuer
    ///
    /// # Errors
    ///
    /// - `NotInsurer` if the caller is neither the owner nor an insurer
    /// - `ZeroAddress` if the holder is the null identity
    pub fn issue_policy(&self, caller: &Identity, terms: PolicyTerms) -> Result<PolicyId, PolicyError> {
        let result: Result<PolicyId, PolicyError> = self.ledger.transact(|ledger| {
            self.authorization.authorize_issuance(ledger, caller, &terms.holder)?;

            let policy_id = ledger.create_policy(
                &self.capability,
                NewPolicy {
                    holder: terms.holder,
                    issuer: *caller,
                    start_date: terms.start_date,
                    end_date: terms.end_date,
                    installments: terms.installments,
                    premium_total: terms.premium_total,
                },
            )?;

            self.events.emit(&PolicyEvent::PolicyIssued {
                holder: terms.holder,
                start_date: terms.start_date,
                end_date: terms.end_date,
                installments: terms.installments,
            });
            Ok(policy_id)
        });

        match &result {
            Ok(policy_id) => tracing::info!(
                %caller,
                %policy_id,
                holder = %terms.holder,
                premium_total = %terms.premium_total,
                "Policy issued"
            ),
            Err(e) => rejected("issue_policy", caller, e),
        }
        result
    }

    /// Pays `amount` towards the premium of a policy
    ///
    /// Checks run in this order: the policy exists, the caller is its
    /// holder, the amount is non-zero, and the new paid total stays within
    /// the premium total.
    ///
    /// # Errors
    ///
    /// - `UnknownPolicy`, `NotPolicyHolder`, `ZeroValue`, `PremiumExceeded`
    pub fn pay_premium(
        &self,
        caller: &Identity,
        policy_id: PolicyId,
        amount: Money,
    ) -> Result<PaymentReceipt, PolicyError> {
        let result: Result<PaymentReceipt, PolicyError> = self.ledger.transact(|ledger| {
            let (holder, paid, total) = {
                let policy = ledger.policy(policy_id)?;
                self.authorization.authorize_payment(policy_id, policy, caller)?;
                (policy.holder, policy.premium_paid(), policy.premium_total)
            };

            if amount.is_zero() {
                return Err(PolicyError::ZeroValue);
            }

            let within_total = paid
                .checked_add(&amount)
                .map(|new_paid| new_paid <= total)
                .unwrap_or(false);
            if !within_total {
                return Err(PolicyError::PremiumExceeded {
                    policy_id,
                    paid,
                    attempted: amount,
                    total,
                });
            }

            let premium_paid = ledger.record_payment(&self.capability, policy_id, amount)?;

            self.events.emit(&PolicyEvent::PremiumPaid {
                policy_id,
                payer: *caller,
                holder,
                amount,
            });

            let policy = ledger.policy(policy_id)?;
            Ok(PaymentReceipt {
                policy_id,
                amount,
                premium_paid,
                outstanding: policy.outstanding(),
                status: policy.payment_status(),
            })
        });

        match &result {
            Ok(receipt) => tracing::info!(
                %caller,
                %policy_id,
                %amount,
                premium_paid = %receipt.premium_paid,
                "Premium paid"
            ),
            Err(e) => rejected("pay_premium", caller, e),
        }
        result
    }
}

impl fmt::Debug for RulesEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RulesEngine")
            .field("identity", &self.capability.identity())
            .field("authorization", &self.authorization)
            .finish_non_exhaustive()
    }
}

fn rejected(operation: &'static str, caller: &Identity, error: &PolicyError) {
    tracing::warn!(operation, %caller, code = error.code(), %error, "Request rejected");
}
