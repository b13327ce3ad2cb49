//! Policy Rules Engine
//!
//! This crate is the gatekeeper between callers and the ledger. It is the
//! only identity the ledger accepts mutations from, and it validates every
//! request against role and monetary constraints before mutating.
//!
//! # Architecture
//!
//! - **Authorization**: a single policy object answers "who may do what"
//! - **Rules Engine**: validates, mutates the ledger, emits events
//! - **Events**: InsurerOnboarded, PolicyIssued, PremiumPaid
//! - **Deployment**: wires a fresh ledger to a fresh engine
//!
//! # Payment Lifecycle
//!
//! ```text
//! Created (paid = 0) -> PartiallyPaid (0 < paid < total) -> FullyPaid (paid = total)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{Deployment, PolicyTerms, RulesEngineConfig};
//!
//! let engine = Deployment::deploy(owner, RulesEngineConfig::default(), sink)?;
//! engine.onboard_insurer(&insurer, insurer)?;
//!
//! let id = engine.issue_policy(&insurer, PolicyTerms::new(holder, start, end, 5, total))?;
//! engine.pay_premium(&holder, id, Money::from_units(1))?;
//! ```

pub mod authorization;
pub mod config;
pub mod deployment;
pub mod error;
pub mod events;
pub mod rules_engine;
pub mod terms;

pub use authorization::{AuthorizationPolicy, OnboardingPolicy, Role};
pub use config::RulesEngineConfig;
pub use deployment::Deployment;
pub use error::PolicyError;
pub use events::{EventLog, EventSink, NoopSink, PolicyEvent, RecordedEvent, TracingSink};
pub use rules_engine::{PaymentReceipt, RulesEngine};
pub use terms::PolicyTerms;
