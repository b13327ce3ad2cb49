//! Domain events emitted by the rules engine
//!
//! Events are append-only notifications for external listeners. Each
//! successful mutating call emits exactly one event and a rejected call
//! emits none. Payloads carry only the fields listeners need to react;
//! sequencing and timestamps are added by the sink that records them.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::temporal::UnixTimestamp;
use core_kernel::{EventId, Identity, Money, PolicyId};

/// Events emitted by the rules engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PolicyEvent {
    /// An identity joined the insurer roster
    InsurerOnboarded {
        insurer: Identity,
    },

    /// A policy has been issued
    PolicyIssued {
        holder: Identity,
        start_date: UnixTimestamp,
        end_date: UnixTimestamp,
        installments: u32,
    },

    /// A premium payment was accepted
    PremiumPaid {
        policy_id: PolicyId,
        payer: Identity,
        holder: Identity,
        amount: Money,
    },
}

impl PolicyEvent {
    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            PolicyEvent::InsurerOnboarded { .. } => "InsurerOnboarded",
            PolicyEvent::PolicyIssued { .. } => "PolicyIssued",
            PolicyEvent::PremiumPaid { .. } => "PremiumPaid",
        }
    }

    /// Returns the policy ID if the event carries one
    pub fn policy_id(&self) -> Option<PolicyId> {
        match self {
            PolicyEvent::PremiumPaid { policy_id, .. } => Some(*policy_id),
            _ => None,
        }
    }
}

/// Receiver of emitted events
///
/// `emit` is called while the ledger lock is held, so sinks observe events
/// in exactly the order the mutations happened. It must not fail and should
/// not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &PolicyEvent);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, event: &PolicyEvent) {
        (**self).emit(event)
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &PolicyEvent) {}
}

/// Logs every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &PolicyEvent) {
        match event {
            PolicyEvent::InsurerOnboarded { insurer } => {
                tracing::info!(event = event.event_type(), %insurer, "Event emitted");
            }
            PolicyEvent::PolicyIssued { holder, start_date, end_date, installments } => {
                tracing::info!(
                    event = event.event_type(),
                    %holder,
                    start_date,
                    end_date,
                    installments,
                    "Event emitted"
                );
            }
            PolicyEvent::PremiumPaid { policy_id, payer, holder, amount } => {
                tracing::info!(
                    event = event.event_type(),
                    %policy_id,
                    %payer,
                    %holder,
                    %amount,
                    "Event emitted"
                );
            }
        }
    }
}

/// An event as stored by [`EventLog`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub id: EventId,
    /// Position in the log, starting at 0
    pub sequence: u64,
    pub recorded_at: DateTime<Utc>,
    pub event: PolicyEvent,
}

/// In-memory append-only event log
///
/// Clones share the same underlying log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded event, oldest first
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.with_entries(|entries| entries.clone())
    }

    /// Returns just the payloads, oldest first
    pub fn payloads(&self) -> Vec<PolicyEvent> {
        self.with_entries(|entries| entries.iter().map(|e| e.event.clone()).collect())
    }

    pub fn len(&self) -> usize {
        self.with_entries(|entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent event, if any
    pub fn last(&self) -> Option<PolicyEvent> {
        self.with_entries(|entries| entries.last().map(|e| e.event.clone()))
    }

    // A panic while appending cannot leave a half-written entry, so a
    // poisoned log is still consistent and is read through.
    fn with_entries<R>(&self, f: impl FnOnce(&mut Vec<RecordedEvent>) -> R) -> R {
        let mut guard = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut *guard)
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: &PolicyEvent) {
        self.with_entries(|entries| {
            let sequence = entries.len() as u64;
            entries.push(RecordedEvent {
                id: EventId::new_v7(),
                sequence,
                recorded_at: Utc::now(),
                event: event.clone(),
            });
        });
    }
}
