//! Unix timestamp helpers
//!
//! Policy dates are held as plain unix-second integers. These helpers give
//! them a chrono view for display and for coverage checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds since the unix epoch
pub type UnixTimestamp = i64;

/// Converts a unix timestamp to a UTC datetime
///
/// Returns None when the value is outside chrono's representable range.
pub fn to_datetime(ts: UnixTimestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// A coverage window as dates, start inclusive and end exclusive
///
/// The window is not validated: an end at or before the start simply
/// contains no instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CoveragePeriod {
    /// Builds a period from two unix timestamps
    pub fn from_timestamps(start: UnixTimestamp, end: UnixTimestamp) -> Option<Self> {
        Some(Self {
            start: to_datetime(start)?,
            end: to_datetime(end)?,
        })
    }

    /// Returns true if the given instant falls within the period
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    /// Length of the window, zero if the end does not follow the start
    pub fn duration(&self) -> chrono::Duration {
        if self.end > self.start {
            self.end - self.start
        } else {
            chrono::Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_timestamps() {
        let period = CoveragePeriod::from_timestamps(1_000_000_000, 2_000_000_000).unwrap();
        assert_eq!(period.start.timestamp(), 1_000_000_000);
        assert!(period.contains(to_datetime(1_500_000_000).unwrap()));
        assert!(!period.contains(to_datetime(2_000_000_000).unwrap()));
        assert_eq!(period.duration().num_seconds(), 1_000_000_000);
    }

    #[test]
    fn test_inverted_period_is_empty() {
        let period = CoveragePeriod::from_timestamps(200, 100).unwrap();
        assert!(!period.contains(to_datetime(150).unwrap()));
        assert_eq!(period.duration(), chrono::Duration::zero());
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert!(CoveragePeriod::from_timestamps(0, i64::MAX).is_none());
    }
}
