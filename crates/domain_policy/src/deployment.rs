//! Wiring a fresh ledger to a fresh rules engine

use std::sync::Arc;

use core_kernel::Identity;
use domain_ledger::LedgerHandle;
use crate::config::RulesEngineConfig;
use crate::error::PolicyError;
use crate::events::EventSink;
use crate::rules_engine::RulesEngine;

/// Deployment procedure for a new system
pub struct Deployment;

impl Deployment {
    /// Initializes a ledger owned by `owner` and binds a new rules engine to it
    ///
    /// The engine gets a freshly generated identity and holds the only
    /// capability the new ledger will accept.
    ///
    /// # Errors
    ///
    /// Returns `ZeroAddress` if `owner` is the null identity
    pub fn deploy(
        owner: Identity,
        config: RulesEngineConfig,
        events: Arc<dyn EventSink>,
    ) -> Result<RulesEngine, PolicyError> {
        Self::deploy_with_identity(owner, Identity::random(), config, events)
    }

    /// Like [`Deployment::deploy`] but with a caller-chosen engine identity
    pub fn deploy_with_identity(
        owner: Identity,
        engine_identity: Identity,
        config: RulesEngineConfig,
        events: Arc<dyn EventSink>,
    ) -> Result<RulesEngine, PolicyError> {
        if owner.is_zero() {
            return Err(PolicyError::ZeroAddress);
        }

        let ledger = LedgerHandle::initialize(owner);
        let capability = ledger.bind_rules_engine(&owner, engine_identity)?;

        tracing::info!(
            %owner,
            rules_engine = %engine_identity,
            onboarding_policy = ?config.onboarding_policy,
            "System deployed"
        );

        Ok(RulesEngine::new(ledger, capability, config, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoopSink;

    #[test]
    fn test_deploy_binds_engine() {
        let owner = Identity::random();
        let engine = Deployment::deploy(owner, RulesEngineConfig::default(), Arc::new(NoopSink)).unwrap();

        let bound = engine.ledger().read(|l| l.rules_engine()).unwrap();
        assert_eq!(bound, Some(engine.identity()));
        assert_eq!(engine.ledger().owner().unwrap(), owner);
    }

    #[test]
    fn test_deploy_rejects_null_owner() {
        let result = Deployment::deploy(Identity::ZERO, RulesEngineConfig::default(), Arc::new(NoopSink));
        assert!(matches!(result, Err(PolicyError::ZeroAddress)));
    }

    #[test]
    fn test_rebinding_after_deploy_fails() {
        let owner = Identity::random();
        let engine = Deployment::deploy(owner, RulesEngineConfig::default(), Arc::new(NoopSink)).unwrap();

        let result = engine.ledger().bind_rules_engine(&owner, Identity::random());
        assert!(matches!(result, Err(domain_ledger::LedgerError::AlreadyBound { .. })));
    }
}
