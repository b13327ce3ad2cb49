//! Custom Test Assertions
//!
//! Assertion helpers for engine results and emitted events that give more
//! meaningful failure messages than bare `assert!`.

use std::fmt::Debug;

use core_kernel::{Money, PolicyId};
use domain_ledger::LedgerHandle;
use domain_policy::{EventLog, PolicyError, PolicyEvent};

/// Asserts that `result` failed with the named condition
///
/// # Panics
///
/// Panics if the result is Ok or carries a different condition
pub fn assert_rejected<T: Debug>(result: Result<T, PolicyError>, expected_code: &str) {
    match result {
        Ok(value) => panic!("Expected {} rejection, got Ok({:?})", expected_code, value),
        Err(e) => assert_eq!(
            e.code(),
            expected_code,
            "Expected {} rejection, got {:?}",
            expected_code,
            e
        ),
    }
}

/// Asserts the paid total of a policy
pub fn assert_premium_paid(ledger: &LedgerHandle, policy_id: PolicyId, expected: Money) {
    let policy = ledger
        .get_policy(policy_id)
        .unwrap_or_else(|e| panic!("Policy {} not readable: {}", policy_id, e));
    assert_eq!(
        policy.premium_paid(),
        expected,
        "Premium paid mismatch on {}: actual={}, expected={}",
        policy_id,
        policy.premium_paid(),
        expected
    );
}

/// Asserts that the most recent event equals `expected`
pub fn assert_last_event(log: &EventLog, expected: &PolicyEvent) {
    let last = log.last();
    assert_eq!(
        last.as_ref(),
        Some(expected),
        "Last event mismatch: actual={:?}, expected={:?}",
        last,
        expected
    );
}

/// Asserts the number of events recorded so far
pub fn assert_event_count(log: &EventLog, expected: usize) {
    let actual = log.len();
    assert_eq!(
        actual, expected,
        "Event count mismatch: actual={}, expected={}, events={:?}",
        actual,
        expected,
        log.payloads()
    );
}
