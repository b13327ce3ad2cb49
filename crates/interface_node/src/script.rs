//! Command scripts
//!
//! A script is a JSON array of commands, each tagged by `action`:
//!
//! ```json
//! [
//!   {"action": "onboard_insurer", "caller": "owner", "insurer": "0xb2b2..."},
//!   {"action": "pay_premium", "caller": "0xc3c3...", "policy_id": 0, "amount": "1"}
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use core_kernel::temporal::UnixTimestamp;
use core_kernel::{CoreError, Identity, Money, PolicyId};
use crate::error::NodeError;

/// Caller alias that resolves to the configured owner
pub const OWNER_ALIAS: &str = "owner";

/// One scripted request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    OnboardInsurer {
        caller: String,
        insurer: String,
    },
    IssuePolicy {
        caller: String,
        holder: String,
        start_date: UnixTimestamp,
        end_date: UnixTimestamp,
        installments: u32,
        premium_total: Money,
    },
    PayPremium {
        caller: String,
        policy_id: PolicyId,
        amount: Money,
    },
    GetPolicy {
        policy_id: PolicyId,
    },
    IsInsurer {
        identity: String,
    },
}

impl Command {
    /// The `action` tag of this command
    pub fn action(&self) -> &'static str {
        match self {
            Command::OnboardInsurer { .. } => "onboard_insurer",
            Command::IssuePolicy { .. } => "issue_policy",
            Command::PayPremium { .. } => "pay_premium",
            Command::GetPolicy { .. } => "get_policy",
            Command::IsInsurer { .. } => "is_insurer",
        }
    }
}

/// Parses a script from JSON text
pub fn parse(json: &str) -> Result<Vec<Command>, NodeError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a script file
pub fn load(path: &Path) -> Result<Vec<Command>, NodeError> {
    let json = std::fs::read_to_string(path).map_err(|source| NodeError::ScriptRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&json)
}

/// Resolves an identity reference, honouring the owner alias
pub fn resolve_identity(reference: &str, owner: Identity) -> Result<Identity, CoreError> {
    if reference.eq_ignore_ascii_case(OWNER_ALIAS) {
        return Ok(owner);
    }
    Ok(reference.parse::<Identity>()?)
}
