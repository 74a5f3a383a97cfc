//! Mirae Quota - Daily Usage Tracking
//!
//! This crate enforces the per-profile daily cap on image generations:
//! - Store: pluggable persistence for the `(date, count)` usage record
//! - Tracker: lazy calendar-day rollover and allow/deny policy
//!
//! There is no midnight timer. The rollover happens on every read: when the
//! stored date is not today's, the record resets to `{today, 0}` and is
//! persisted immediately. The record is shared across all processes using
//! the same data directory without locking; the last writer wins, which is
//! acceptable for a soft abuse cap.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod tracker;

pub use error::{QuotaError, Result};
pub use store::{FileUsageStore, MemoryUsageStore, UsageRecord, UsageStore};
pub use tracker::{UsageSnapshot, UsageTracker, DAILY_LIMIT};
