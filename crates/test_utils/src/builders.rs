//! Test Data Builders
//!
//! Builders for a deployed system and for policy terms, using the fixture
//! defaults for anything a test does not set.

use std::sync::Arc;

use core_kernel::{Identity, Money};
use domain_policy::{
    Deployment, EventLog, OnboardingPolicy, PolicyTerms, RulesEngine, RulesEngineConfig,
};

use crate::fixtures::{IdentityFixtures, MoneyFixtures, TemporalFixtures};

/// A deployed system together with its event log
pub struct TestSystem {
    pub engine: RulesEngine,
    pub events: EventLog,
    pub owner: Identity,
}

/// Builder for a deployed system
pub struct TestSystemBuilder {
    owner: Identity,
    onboarding_policy: OnboardingPolicy,
    insurers: Vec<Identity>,
}

impl Default for TestSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSystemBuilder {
    /// Creates a builder with the fixture owner and open onboarding
    pub fn new() -> Self {
        Self {
            owner: IdentityFixtures::owner(),
            onboarding_policy: OnboardingPolicy::Open,
            insurers: Vec::new(),
        }
    }

    /// Sets the onboarding policy
    pub fn with_onboarding_policy(mut self, policy: OnboardingPolicy) -> Self {
        self.onboarding_policy = policy;
        self
    }

    /// Onboards `insurer` as the owner during build
    pub fn with_insurer(mut self, insurer: Identity) -> Self {
        self.insurers.push(insurer);
        self
    }

    /// Deploys the system
    ///
    /// # Panics
    ///
    /// Panics if deployment or onboarding fails
    pub fn build(self) -> TestSystem {
        let events = EventLog::new();
        let config = RulesEngineConfig::default().with_onboarding_policy(self.onboarding_policy);
        let engine = Deployment::deploy_with_identity(
            self.owner,
            IdentityFixtures::rules_engine(),
            config,
            Arc::new(events.clone()),
        )
        .expect("deployment failed");

        for insurer in self.insurers {
            engine
                .onboard_insurer(&self.owner, insurer)
                .expect("onboarding failed");
        }

        TestSystem {
            engine,
            events,
            owner: self.owner,
        }
    }
}

/// Builder for policy terms
pub struct PolicyTermsBuilder {
    holder: Identity,
    start_date: i64,
    end_date: i64,
    installments: u32,
    premium_total: Money,
}

impl Default for PolicyTermsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyTermsBuilder {
    pub fn new() -> Self {
        Self {
            holder: IdentityFixtures::holder(),
            start_date: TemporalFixtures::start_date(),
            end_date: TemporalFixtures::end_date(),
            installments: TemporalFixtures::installments(),
            premium_total: MoneyFixtures::premium_total(),
        }
    }

    pub fn holder(mut self, holder: Identity) -> Self {
        self.holder = holder;
        self
    }

    pub fn dates(mut self, start_date: i64, end_date: i64) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn installments(mut self, installments: u32) -> Self {
        self.installments = installments;
        self
    }

    pub fn premium_total(mut self, premium_total: Money) -> Self {
        self.premium_total = premium_total;
        self
    }

    pub fn build(self) -> PolicyTerms {
        PolicyTerms::new(
            self.holder,
            self.start_date,
            self.end_date,
            self.installments,
            self.premium_total,
        )
    }
}
