//! Usage record persistence.
//!
//! The store only moves records in and out of storage; all policy (daily
//! limit, date rollover) lives in [`crate::tracker`]. Keeping the seam here
//! lets the tracker and the lifecycle controller run against an in-memory
//! fake in tests.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{QuotaError, Result};

/// One day's persisted usage: the calendar day and how many generations
/// were charged on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Calendar day the count applies to
    pub date: NaiveDate,
    /// Generations charged so far on that day
    pub count: u32,
}

/// Persistence seam for the usage record.
pub trait UsageStore: Send + Sync {
    /// Load the stored record, or `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<UsageRecord>>;

    /// Persist the record, replacing whatever was stored before.
    fn save(&self, record: &UsageRecord) -> Result<()>;
}

// ============================================================================
// MemoryUsageStore
// ============================================================================

/// In-memory store for tests and embedders that manage persistence
/// themselves.
#[derive(Debug, Default)]
pub struct MemoryUsageStore {
    record: Mutex<Option<UsageRecord>>,
}

impl MemoryUsageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a record.
    #[must_use]
    pub fn with_record(record: UsageRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl UsageStore for MemoryUsageStore {
    fn load(&self) -> Result<Option<UsageRecord>> {
        Ok(*self.record.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn save(&self, record: &UsageRecord) -> Result<()> {
        *self.record.lock().unwrap_or_else(|e| e.into_inner()) = Some(*record);
        Ok(())
    }
}

// ============================================================================
// FileUsageStore
// ============================================================================

/// JSON-file-backed store, one record per file.
///
/// A missing file loads as `None`. A corrupt file is treated the same way
/// so the tracker's lazy reset can heal it on the next write. Writes do
/// not take a lock: concurrent processes race last-writer-wins, matching
/// the documented semantics of the shared counter.
#[derive(Debug)]
pub struct FileUsageStore {
    path: PathBuf,
}

impl FileUsageStore {
    /// Create a store at the given path. Nothing is touched on disk until
    /// the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the platform default location
    /// (`<data_dir>/mirae/usage.json`).
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir().ok_or(QuotaError::NoDataDir)?;
        Ok(Self::new(dir.join("mirae").join("usage.json")))
    }

    /// Path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UsageStore for FileUsageStore {
    fn load(&self) -> Result<Option<UsageRecord>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt usage record, treating as absent");
                Ok(None)
            }
        }
    }

    fn save(&self, record: &UsageRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(record)?)?;
        debug!(path = %self.path.display(), count = record.count, "usage record saved");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
