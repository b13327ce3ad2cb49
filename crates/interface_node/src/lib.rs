//! Premium Ledger Node
//!
//! Deploys a ledger and rules engine and runs JSON command scripts against
//! them, reporting each outcome and the resulting event log.
//!
//! # Architecture
//!
//! - **Config**: `NODE_` environment variables and an optional config file
//! - **Script**: tagged command parsing and identity resolution
//! - **Runner**: executes commands, turns results into outcome lines
//! - **Telemetry**: tracing subscriber setup for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_node::{config::NodeConfig, runner::Runner, script};
//!
//! let runner = Runner::deploy(&NodeConfig::from_env()?)?;
//! let outcomes = runner.run(&script::load(path)?);
//! ```

pub mod config;
pub mod error;
pub mod runner;
pub mod script;
pub mod telemetry;

pub use config::NodeConfig;
pub use error::NodeError;
pub use runner::{ErrorBody, Outcome, Runner};
pub use script::Command;
