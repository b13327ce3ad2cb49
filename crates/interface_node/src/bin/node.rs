//! Premium Ledger - Node Binary
//!
//! Deploys a fresh ledger and rules engine, runs a command script, and prints
//! one JSON line per command followed by the event log.
//!
//! # Usage
//!
//! ```bash
//! premium-node script.json
//!
//! NODE_OWNER=0xa1a1... NODE_ONBOARDING_POLICY=owner_only premium-node script.json
//! ```
//!
//! # Environment Variables
//!
//! * `NODE_CONFIG_FILE` - Optional configuration file
//! * `NODE_OWNER` - Ledger owner identity (default: random)
//! * `NODE_ONBOARDING_POLICY` - `open` or `owner_only` (default: open)
//! * `NODE_LOG_LEVEL` - Log level (default: info)
//! * `NODE_LOG_JSON` - Emit logs as JSON (default: false)
//! * `NODE_SCRIPT_PATH` - Script used when no argument is given

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use interface_node::{script, telemetry, NodeConfig, NodeError, Runner};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = NodeConfig::from_env().context("loading configuration")?;
    telemetry::init_tracing(&config.log_level, config.log_json);

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.script_path.clone())
        .ok_or(NodeError::MissingScript)?;

    let commands = script::load(&path)?;
    let runner = Runner::deploy(&config)?;

    tracing::info!(
        owner = %runner.owner(),
        rules_engine = %runner.engine().identity(),
        script = %path.display(),
        commands = commands.len(),
        "Running script"
    );

    let outcomes = runner.run(&commands);
    let rejected = outcomes.iter().filter(|o| !o.ok).count();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for outcome in &outcomes {
        writeln!(out, "{}", serde_json::to_string(outcome)?)?;
    }
    for event in runner.events() {
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }

    tracing::info!(accepted = outcomes.len() - rejected, rejected, "Script complete");
    Ok(())
}
