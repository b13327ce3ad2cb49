//! Script execution against a freshly deployed system

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use core_kernel::{CoreError, Identity};
use domain_policy::{
    Deployment, EventLog, EventSink, PolicyError, PolicyEvent, PolicyTerms, RecordedEvent,
    RulesEngine, TracingSink,
};
use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::script::{resolve_identity, Command};

/// Records events and mirrors them to the log
#[derive(Debug, Clone, Default)]
struct RecordingSink {
    log: EventLog,
    tracing: TracingSink,
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &PolicyEvent) {
        self.tracing.emit(event);
        self.log.emit(event);
    }
}

/// Failure detail in an outcome line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl From<&PolicyError> for ErrorBody {
    fn from(error: &PolicyError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&CoreError> for ErrorBody {
    fn from(error: &CoreError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Result of one scripted command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub index: usize,
    pub action: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Outcome {
    fn success(index: usize, action: &'static str, result: Value) -> Self {
        Self {
            index,
            action,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    fn failure(index: usize, action: &'static str, error: ErrorBody) -> Self {
        Self {
            index,
            action,
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

enum StepError {
    Input(CoreError),
    Rejected(PolicyError),
}

impl From<CoreError> for StepError {
    fn from(error: CoreError) -> Self {
        StepError::Input(error)
    }
}

impl From<PolicyError> for StepError {
    fn from(error: PolicyError) -> Self {
        StepError::Rejected(error)
    }
}

impl From<domain_ledger::LedgerError> for StepError {
    fn from(error: domain_ledger::LedgerError) -> Self {
        StepError::Rejected(error.into())
    }
}

/// Runs commands against one deployed ledger and rules engine
#[derive(Debug)]
pub struct Runner {
    engine: RulesEngine,
    owner: Identity,
    events: EventLog,
}

impl Runner {
    /// Deploys a fresh system from `config`
    pub fn deploy(config: &NodeConfig) -> Result<Self, NodeError> {
        let owner = config.owner.unwrap_or_else(Identity::random);
        let sink = RecordingSink::default();
        let events = sink.log.clone();
        let engine = Deployment::deploy(owner, config.rules_engine_config(), Arc::new(sink))?;

        Ok(Self {
            engine,
            owner,
            events,
        })
    }

    pub fn owner(&self) -> Identity {
        self.owner
    }

    pub fn engine(&self) -> &RulesEngine {
        &self.engine
    }

    /// Events recorded so far
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.events()
    }

    /// Executes every command in order
    ///
    /// A failing command does not stop the script.
    pub fn run(&self, commands: &[Command]) -> Vec<Outcome> {
        commands
            .iter()
            .enumerate()
            .map(|(index, command)| self.execute(index, command))
            .collect()
    }

    /// Executes one command
    pub fn execute(&self, index: usize, command: &Command) -> Outcome {
        let action = command.action();
        match self.step(command) {
            Ok(result) => Outcome::success(index, action, result),
            Err(StepError::Input(e)) => {
                tracing::warn!(index, action, error = %e, "Invalid command input");
                Outcome::failure(index, action, ErrorBody::from(&e))
            }
            Err(StepError::Rejected(e)) => Outcome::failure(index, action, ErrorBody::from(&e)),
        }
    }

    fn step(&self, command: &Command) -> Result<Value, StepError> {
        match command {
            Command::OnboardInsurer { caller, insurer } => {
                let caller = self.resolve(caller)?;
                let insurer = self.resolve(insurer)?;
                let added = self.engine.onboard_insurer(&caller, insurer)?;
                Ok(json!({ "insurer": insurer, "added": added }))
            }
            Command::IssuePolicy {
                caller,
                holder,
                start_date,
                end_date,
                installments,
                premium_total,
            } => {
                let caller = self.resolve(caller)?;
                let terms = PolicyTerms::new(
                    self.resolve(holder)?,
                    *start_date,
                    *end_date,
                    *installments,
                    *premium_total,
                );
                let policy_id = self.engine.issue_policy(&caller, terms)?;
                Ok(json!({ "policy_id": policy_id }))
            }
            Command::PayPremium {
                caller,
                policy_id,
                amount,
            } => {
                let caller = self.resolve(caller)?;
                let receipt = self.engine.pay_premium(&caller, *policy_id, *amount)?;
                Ok(to_value(&receipt))
            }
            Command::GetPolicy { policy_id } => {
                let policy = self.engine.ledger().get_policy(*policy_id)?;
                let mut value = to_value(&policy);
                if let Value::Object(fields) = &mut value {
                    fields.insert("policy_id".to_string(), json!(policy_id));
                    fields.insert("status".to_string(), json!(policy.payment_status()));
                }
                Ok(value)
            }
            Command::IsInsurer { identity } => {
                let identity = self.resolve(identity)?;
                let is_insurer = self.engine.ledger().is_insurer(&identity)?;
                Ok(json!({ "identity": identity, "is_insurer": is_insurer }))
            }
        }
    }

    fn resolve(&self, reference: &str) -> Result<Identity, CoreError> {
        resolve_identity(reference, self.owner)
    }
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
