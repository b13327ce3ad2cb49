//! Rules engine configuration

use serde::Deserialize;

use crate::authorization::OnboardingPolicy;

/// Settings that change rules engine behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RulesEngineConfig {
    /// Who may onboard insurers
    pub onboarding_policy: OnboardingPolicy,
}

impl RulesEngineConfig {
    pub fn with_onboarding_policy(mut self, policy: OnboardingPolicy) -> Self {
        self.onboarding_policy = policy;
        self
    }
}
