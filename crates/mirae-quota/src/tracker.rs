//! Usage policy over a [`UsageStore`].
//!
//! Every operation re-reads the store; nothing is cached between calls.
//! `can_use` is advisory (it gates the UI before an expensive network
//! call), `record_use` is authoritative — it re-validates the count right
//! before writing, so a stale earlier read can never push the stored count
//! past the limit.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::Result;
use crate::store::{UsageRecord, UsageStore};

/// Fixed daily cap on charged generations. Not configurable at runtime.
pub const DAILY_LIMIT: u32 = 10;

/// Point-in-time view of today's usage, shaped for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageSnapshot {
    /// Generations charged today
    pub count: u32,
    /// The daily cap
    pub limit: u32,
    /// Generations still available today
    pub remaining: u32,
}

impl UsageSnapshot {
    /// Fraction of the cap already used, as a percentage for the usage bar.
    #[must_use]
    pub fn percent_used(&self) -> f64 {
        if self.limit == 0 {
            return 0.0;
        }
        f64::from(self.count.min(self.limit)) / f64::from(self.limit) * 100.0
    }
}

/// Daily usage tracker.
pub struct UsageTracker {
    store: Arc<dyn UsageStore>,
}

impl UsageTracker {
    /// Create a tracker over the given store.
    pub fn new(store: Arc<dyn UsageStore>) -> Self {
        Self { store }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Today's record, resetting lazily when the stored date is stale.
    ///
    /// The reset is persisted before returning, so two reads in the same
    /// calendar day always observe the same record.
    pub fn current(&self) -> Result<UsageRecord> {
        let today = Self::today();
        match self.store.load()? {
            Some(record) if record.date == today => Ok(record),
            stale => {
                let fresh = UsageRecord {
                    date: today,
                    count: 0,
                };
                self.store.save(&fresh)?;
                if let Some(old) = stale {
                    debug!(old_date = %old.date, old_count = old.count, "usage count reset for new day");
                }
                Ok(fresh)
            }
        }
    }

    /// Generations still available today, saturating at zero.
    pub fn remaining(&self) -> Result<u32> {
        Ok(DAILY_LIMIT.saturating_sub(self.current()?.count))
    }

    /// Advisory allow/deny gate.
    pub fn can_use(&self) -> Result<bool> {
        Ok(self.remaining()? > 0)
    }

    /// Charge one generation. Returns `false` without writing when the cap
    /// is already reached.
    pub fn record_use(&self) -> Result<bool> {
        let record = self.current()?;
        if record.count >= DAILY_LIMIT {
            debug!(count = record.count, "daily limit reached, usage not recorded");
            return Ok(false);
        }
        self.store.save(&UsageRecord {
            date: record.date,
            count: record.count + 1,
        })?;
        Ok(true)
    }

    /// Display snapshot of today's usage.
    pub fn snapshot(&self) -> Result<UsageSnapshot> {
        let record = self.current()?;
        Ok(UsageSnapshot {
            count: record.count,
            limit: DAILY_LIMIT,
            remaining: DAILY_LIMIT.saturating_sub(record.count),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryUsageStore;
    use chrono::Days;

    fn tracker_with(record: Option<UsageRecord>) -> (UsageTracker, Arc<MemoryUsageStore>) {
        let store = Arc::new(match record {
            Some(r) => MemoryUsageStore::with_record(r),
            None => MemoryUsageStore::new(),
        });
        (UsageTracker::new(Arc::clone(&store) as Arc<dyn UsageStore>), store)
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    #[test]
    fn test_fresh_store_starts_at_zero() {
        let (tracker, _store) = tracker_with(None);
        let record = tracker.current().unwrap();
        assert_eq!(record.date, today());
        assert_eq!(record.count, 0);
        assert_eq!(tracker.remaining().unwrap(), DAILY_LIMIT);
    }

    #[test]
    fn test_increment_succeeds_below_limit() {
        for count in 0..DAILY_LIMIT {
            let (tracker, store) = tracker_with(Some(UsageRecord {
                date: today(),
                count,
            }));

            assert!(tracker.record_use().unwrap());
            assert_eq!(store.load().unwrap().unwrap().count, count + 1);
            assert_eq!(tracker.remaining().unwrap(), DAILY_LIMIT - (count + 1));
        }
    }

    #[test]
    fn test_exhausted_quota_denies_and_does_not_write() {
        let (tracker, store) = tracker_with(Some(UsageRecord {
            date: today(),
            count: DAILY_LIMIT,
        }));

        assert!(!tracker.can_use().unwrap());
        assert!(!tracker.record_use().unwrap());
        assert_eq!(store.load().unwrap().unwrap().count, DAILY_LIMIT);
    }

    #[test]
    fn test_clamps_at_limit_over_repeated_calls() {
        let (tracker, store) = tracker_with(None);

        let mut granted = 0;
        for _ in 0..15 {
            if tracker.record_use().unwrap() {
                granted += 1;
            }
        }

        assert_eq!(granted, DAILY_LIMIT);
        assert_eq!(store.load().unwrap().unwrap().count, DAILY_LIMIT);
        assert!(!tracker.can_use().unwrap());
    }

    #[test]
    fn test_stale_date_resets_on_read() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let (tracker, store) = tracker_with(Some(UsageRecord {
            date: yesterday,
            count: 7,
        }));

        let record = tracker.current().unwrap();
        assert_eq!(record.date, today());
        assert_eq!(record.count, 0);

        // Reset was persisted, not just returned.
        assert_eq!(store.load().unwrap().unwrap(), record);
    }

    #[test]
    fn test_read_is_idempotent_within_a_day() {
        let (tracker, _store) = tracker_with(Some(UsageRecord {
            date: today(),
            count: 4,
        }));

        let first = tracker.current().unwrap();
        let second = tracker.current().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.count, 4);
    }

    #[test]
    fn test_snapshot_matches_record() {
        let (tracker, _store) = tracker_with(Some(UsageRecord {
            date: today(),
            count: 3,
        }));

        let snapshot = tracker.snapshot().unwrap();
        assert_eq!(snapshot.count, 3);
        assert_eq!(snapshot.limit, DAILY_LIMIT);
        assert_eq!(snapshot.remaining, 7);
        assert!((snapshot.percent_used() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percent_used_caps_at_hundred() {
        // A tampered store may hold an out-of-range count; display clamps.
        let snapshot = UsageSnapshot {
            count: 99,
            limit: DAILY_LIMIT,
            remaining: 0,
        };
        assert!((snapshot.percent_used() - 100.0).abs() < f64::EPSILON);
    }
}
