//! Freshness-bounded cache for dashboard download counts.
//!
//! # Responsibilities
//! - Serve download counts that are still within the freshness window
//! - Classify requested ids into fresh and stale/missing
//! - Fold freshly fetched batches back into the shared map
//!
//! # Design Decisions
//! - Check takes the shared lock, merge takes the exclusive lock
//! - No lock is ever held across network I/O
//! - Entries are superseded in place, never evicted

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// A dashboard's name and download count.
///
/// This is a small snippet of the data available from the dashboard
/// API; `fetched_at` is stamped locally by the fetcher.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub id: i64,
    pub name: String,
    pub downloads: i64,
    /// When this record was fetched, not when it was last read.
    pub fetched_at: Instant,
}

/// Shared map of dashboard id → cached record.
///
/// One instance lives for the process lifetime and is shared by every
/// request; there is no per-request state.
pub struct DashboardCache {
    window: Duration,
    entries: RwLock<HashMap<String, Dashboard>>,
}

impl DashboardCache {
    /// Create an empty cache whose entries stay fresh for `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Sum the download counts of the ids that are still fresh and
    /// return the ids that need a refetch, preserving request order.
    ///
    /// Repeated ids are counted once per occurrence; callers see
    /// read-through semantics per occurrence, not per unique id.
    pub fn check_existing(&self, ids: &[String]) -> (i64, Vec<String>) {
        let entries = self.entries.read().expect("cache lock poisoned");

        let mut counter = 0;
        let mut fetch = Vec::new();

        for id in ids {
            match entries.get(id) {
                Some(board) if board.fetched_at.elapsed() <= self.window => {
                    counter += board.downloads;
                }
                _ => fetch.push(id.clone()),
            }
        }

        (counter, fetch)
    }

    /// Insert or overwrite a batch of freshly fetched records and
    /// return the sum of their download counts.
    ///
    /// This is the only mutator of the map. It must run only after
    /// every fetch in the batch succeeded, so the cache never holds a
    /// record whose sibling in the same request failed.
    pub fn merge(&self, boards: Vec<Dashboard>) -> i64 {
        let mut entries = self.entries.write().expect("cache lock poisoned");

        let mut counter = 0;
        for board in boards {
            counter += board.downloads;
            entries.insert(board.id.to_string(), board);
        }

        counter
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
