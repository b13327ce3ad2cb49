//! Shared, lock-guarded access to a ledger
//!
//! `LedgerHandle` is the unit of sharing between the rules engine and
//! readers. The whole ledger sits behind one mutex, and [`LedgerHandle::transact`]
//! runs a closure with exclusive access, so a read-check-then-write sequence
//! inside it cannot interleave with any other call.
//!
//! The closure gets a [`LedgerTxn`], never `&mut Ledger`: it can read the
//! ledger and call the capability-checked mutations, but it cannot replace
//! or rebuild the ledger it was handed.
//!
//! ```compile_fail
//! use core_kernel::Identity;
//! use domain_ledger::{Ledger, LedgerError, LedgerHandle};
//!
//! let handle = LedgerHandle::initialize(Identity::from_bytes([1; 20]));
//! let _: Result<(), LedgerError> = handle.transact(|txn| {
//!     **txn = Ledger::initialize(Identity::from_bytes([2; 20]));
//!     Ok(())
//! });
//! ```

use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard};

use core_kernel::{Identity, Money, PolicyId};
use crate::capability::RulesEngineCapability;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::policy::{NewPolicy, Policy};

/// Cloneable handle to a single shared ledger
#[derive(Debug, Clone)]
pub struct LedgerHandle {
    inner: Arc<Mutex<Ledger>>,
}

impl LedgerHandle {
    /// Initializes a new ledger owned by `caller`
    pub fn initialize(caller: Identity) -> Self {
        Self::from_ledger(Ledger::initialize(caller))
    }

    /// Wraps an existing ledger
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Binds the rules engine; see [`Ledger::bind_rules_engine`]
    pub fn bind_rules_engine(
        &self,
        caller: &Identity,
        engine: Identity,
    ) -> Result<RulesEngineCapability, LedgerError> {
        self.lock()?.bind_rules_engine(caller, engine)
    }

    /// Runs `f` with exclusive access to the ledger
    ///
    /// Nothing else can observe or change the ledger until `f` returns.
    /// The error type only needs to absorb `LedgerError` so callers can
    /// use their own domain errors inside the closure.
    pub fn transact<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut LedgerTxn<'_>) -> Result<R, E>,
        E: From<LedgerError>,
    {
        let mut guard = self.lock()?;
        let mut txn = LedgerTxn { ledger: &mut *guard };
        f(&mut txn)
    }

    /// Runs `f` with a shared view of the ledger
    pub fn read<R, F>(&self, f: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&Ledger) -> R,
    {
        let guard = self.lock()?;
        Ok(f(&*guard))
    }

    pub fn owner(&self) -> Result<Identity, LedgerError> {
        self.read(Ledger::owner)
    }

    pub fn is_insurer(&self, identity: &Identity) -> Result<bool, LedgerError> {
        self.read(|l| l.is_insurer(identity))
    }

    /// Returns a snapshot of the policy
    pub fn get_policy(&self, policy_id: PolicyId) -> Result<Policy, LedgerError> {
        self.read(|l| l.policy(policy_id).cloned())?
    }

    fn lock(&self) -> Result<MutexGuard<'_, Ledger>, LedgerError> {
        self.inner.lock().map_err(|_| LedgerError::LockPoisoned)
    }
}

/// Exclusive access to a locked ledger for the length of one transaction
///
/// Dereferences to `&Ledger` for reads. Mutations go through the
/// capability-checked methods below.
#[derive(Debug)]
pub struct LedgerTxn<'a> {
    ledger: &'a mut Ledger,
}

impl LedgerTxn<'_> {
    /// See [`Ledger::register_insurer`]
    pub fn register_insurer(
        &mut self,
        capability: &RulesEngineCapability,
        insurer: Identity,
    ) -> Result<bool, LedgerError> {
        self.ledger.register_insurer(capability, insurer)
    }

    /// See [`Ledger::create_policy`]
    pub fn create_policy(
        &mut self,
        capability: &RulesEngineCapability,
        new: NewPolicy,
    ) -> Result<PolicyId, LedgerError> {
        self.ledger.create_policy(capability, new)
    }

    /// See [`Ledger::record_payment`]
    pub fn record_payment(
        &mut self,
        capability: &RulesEngineCapability,
        policy_id: PolicyId,
        amount: Money,
    ) -> Result<Money, LedgerError> {
        self.ledger.record_payment(capability, policy_id, amount)
    }
}

impl Deref for LedgerTxn<'_> {
    type Target = Ledger;

    fn deref(&self) -> &Ledger {
        &*self.ledger
    }
}
