//! Node configuration

use std::path::PathBuf;

use serde::Deserialize;

use core_kernel::Identity;
use domain_policy::{OnboardingPolicy, RulesEngineConfig};

/// Environment variable naming an optional configuration file
pub const CONFIG_FILE_VAR: &str = "NODE_CONFIG_FILE";

/// Node configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Ledger owner; a random identity is generated when unset
    pub owner: Option<Identity>,
    /// Who may onboard insurers
    pub onboarding_policy: OnboardingPolicy,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON
    pub log_json: bool,
    /// Command script to run when none is given on the command line
    pub script_path: Option<PathBuf>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            owner: None,
            onboarding_policy: OnboardingPolicy::Open,
            log_level: "info".to_string(),
            log_json: false,
            script_path: None,
        }
    }
}

impl NodeConfig {
    /// Loads configuration from the optional file and `NODE_` variables
    ///
    /// Environment variables override values from the file.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let file = std::env::var(CONFIG_FILE_VAR).ok();
        Self::load(file.as_deref())
    }

    /// Loads configuration from `file` (if any) and the environment
    pub fn load(file: Option<&str>) -> Result<Self, config::ConfigError> {
        Self::load_with(file, config::Environment::with_prefix("NODE"))
    }

    // Environment values stay strings: a digit-only owner is still hex.
    fn load_with(
        file: Option<&str>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path));
        }
        builder.add_source(environment).build()?.try_deserialize()
    }

    /// Settings handed to the rules engine
    pub fn rules_engine_config(&self) -> RulesEngineConfig {
        RulesEngineConfig::default().with_onboarding_policy(self.onboarding_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NodeConfig::default();
        assert!(config.owner.is_none());
        assert_eq!(config.onboarding_policy, OnboardingPolicy::Open);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("NODE").source(Some(source))
    }

    #[test]
    fn test_digit_only_owner_from_environment() {
        let digits = "1".repeat(40);
        let config = NodeConfig::load_with(
            None,
            environment(&[
                ("NODE_OWNER", digits.as_str()),
                ("NODE_LOG_JSON", "true"),
                ("NODE_ONBOARDING_POLICY", "owner_only"),
            ]),
        )
        .unwrap();

        assert_eq!(config.owner, Some(Identity::from_bytes([0x11; 20])));
        assert!(config.log_json);
        assert_eq!(config.onboarding_policy, OnboardingPolicy::OwnerOnly);
    }

    #[test]
    fn test_prefixed_owner_from_environment() {
        let owner = Identity::from_bytes([0xab; 20]).to_string();
        let config = NodeConfig::load_with(None, environment(&[("NODE_OWNER", owner.as_str())])).unwrap();

        assert_eq!(config.owner, Some(Identity::from_bytes([0xab; 20])));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_rules_engine_config_carries_policy() {
        let config = NodeConfig {
            onboarding_policy: OnboardingPolicy::OwnerOnly,
            ..NodeConfig::default()
        };
        assert_eq!(
            config.rules_engine_config().onboarding_policy,
            OnboardingPolicy::OwnerOnly
        );
    }
}
