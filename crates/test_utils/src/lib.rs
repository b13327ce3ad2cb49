//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! premium ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Well-known identities and amounts
//! - `builders`: Builders for deployed systems and policy terms
//! - `assertions`: Assertion helpers for engine results and events
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
