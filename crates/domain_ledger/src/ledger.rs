//! The policy ledger
//!
//! Stores the owner, the one-shot rules engine binding, the insurer roster
//! and the policy sequence. Mutations require the [`RulesEngineCapability`]
//! minted by this ledger's binding; reads are unrestricted.

use std::collections::HashSet;

use core_kernel::{Identity, LedgerId, Money, PolicyId};
use crate::capability::RulesEngineCapability;
use crate::error::LedgerError;
use crate::policy::{NewPolicy, Policy};

/// Durable policy and authorization state
///
/// # Invariants
///
/// - `owner` never changes after initialization
/// - `rules_engine` is set at most once
/// - the insurer roster only grows
/// - policy ids are insertion indices and are never reused
#[derive(Debug)]
pub struct Ledger {
    id: LedgerId,
    owner: Identity,
    rules_engine: Option<Identity>,
    insurers: HashSet<Identity>,
    policies: Vec<Policy>,
}

impl Ledger {
    /// Creates a ledger owned by the initializing caller
    ///
    /// The rules engine is left unbound, so every mutation is refused until
    /// [`Ledger::bind_rules_engine`] succeeds.
    pub fn initialize(caller: Identity) -> Self {
        let id = LedgerId::new_v7();
        tracing::debug!(ledger = %id, owner = %caller, "Ledger initialized");
        Self {
            id,
            owner: caller,
            rules_engine: None,
            insurers: HashSet::new(),
            policies: Vec::new(),
        }
    }

    /// Binds the single trusted mutator
    ///
    /// Returns the only capability that will ever be accepted by this
    /// ledger's mutating calls.
    ///
    /// # Errors
    ///
    /// - `NotOwner` if the caller is not the owner
    /// - `AlreadyBound` if a rules engine is already bound
    /// - `ZeroAddress` if `engine` is the null identity
    pub fn bind_rules_engine(
        &mut self,
        caller: &Identity,
        engine: Identity,
    ) -> Result<RulesEngineCapability, LedgerError> {
        if *caller != self.owner {
            return Err(LedgerError::NotOwner { caller: *caller });
        }
        if let Some(bound) = self.rules_engine {
            return Err(LedgerError::AlreadyBound { bound });
        }
        if engine.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        self.rules_engine = Some(engine);
        tracing::debug!(ledger = %self.id, rules_engine = %engine, "Rules engine bound");
        Ok(RulesEngineCapability::new(self.id, engine))
    }

    /// Adds an identity to the insurer roster
    ///
    /// Idempotent. Returns true if the identity was not already an insurer.
    pub fn register_insurer(
        &mut self,
        capability: &RulesEngineCapability,
        insurer: Identity,
    ) -> Result<bool, LedgerError> {
        self.ensure_rules_engine(capability)?;

        let added = self.insurers.insert(insurer);
        tracing::debug!(%insurer, added, "Insurer registered");
        Ok(added)
    }

    /// Appends a new policy with nothing paid and returns its id
    pub fn create_policy(
        &mut self,
        capability: &RulesEngineCapability,
        new: NewPolicy,
    ) -> Result<PolicyId, LedgerError> {
        self.ensure_rules_engine(capability)?;

        let policy_id = PolicyId::new(self.policies.len() as u64);
        self.policies.push(Policy::from_new(new));

        tracing::debug!(%policy_id, "Policy created");
        Ok(policy_id)
    }

    /// Adds `amount` to the paid total of a policy
    ///
    /// # Returns
    ///
    /// The new paid total
    ///
    /// # Errors
    ///
    /// - `NotRulesEngine` if the capability was not minted by this ledger
    /// - `UnknownPolicy` if the id is out of range
    pub fn record_payment(
        &mut self,
        capability: &RulesEngineCapability,
        policy_id: PolicyId,
        amount: Money,
    ) -> Result<Money, LedgerError> {
        self.ensure_rules_engine(capability)?;

        let policy = policy_id
            .index()
            .and_then(|i| self.policies.get_mut(i))
            .ok_or(LedgerError::UnknownPolicy(policy_id))?;

        let paid = policy.premium_paid().checked_add(&amount)?;
        policy.set_premium_paid(paid);

        tracing::debug!(%policy_id, %amount, premium_paid = %paid, "Payment recorded");
        Ok(paid)
    }

    pub fn id(&self) -> LedgerId {
        self.id
    }

    /// The identity that initialized the ledger
    pub fn owner(&self) -> Identity {
        self.owner
    }

    /// The bound rules engine, if any
    pub fn rules_engine(&self) -> Option<Identity> {
        self.rules_engine
    }

    /// Returns true if the identity is on the insurer roster
    pub fn is_insurer(&self, identity: &Identity) -> bool {
        self.insurers.contains(identity)
    }

    /// Looks up a policy by id
    pub fn policy(&self, policy_id: PolicyId) -> Result<&Policy, LedgerError> {
        policy_id
            .index()
            .and_then(|i| self.policies.get(i))
            .ok_or(LedgerError::UnknownPolicy(policy_id))
    }

    /// Number of policies ever issued
    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }

    /// Number of identities on the insurer roster
    pub fn insurer_count(&self) -> usize {
        self.insurers.len()
    }

    /// Ids of the policies held by `holder`, in issue order
    pub fn policies_held_by(&self, holder: &Identity) -> Vec<PolicyId> {
        self.policies
            .iter()
            .enumerate()
            .filter(|(_, p)| p.holder == *holder)
            .map(|(i, _)| PolicyId::new(i as u64))
            .collect()
    }

    /// Sum of premium paid across every policy
    pub fn total_premium_collected(&self) -> Result<Money, LedgerError> {
        self.policies
            .iter()
            .try_fold(Money::zero(), |acc, p| acc.checked_add(&p.premium_paid()))
            .map_err(LedgerError::from)
    }

    fn ensure_rules_engine(&self, capability: &RulesEngineCapability) -> Result<(), LedgerError> {
        let caller = capability.identity();
        match self.rules_engine {
            Some(engine) if engine == caller && capability.ledger_id() == self.id => Ok(()),
            _ => Err(LedgerError::NotRulesEngine { caller }),
        }
    }
}
