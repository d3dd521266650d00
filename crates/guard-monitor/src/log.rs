//! # Request Log
//!
//! A fixed-capacity, most-recent-first record of observed request/response
//! cycles. When the sequence would exceed capacity, the oldest entry is
//! dropped; the bound caps memory use deterministically no matter how many
//! cycles the process handles.
//!
//! ## Ordering
//!
//! Entries are inserted in the order their cycles *complete*, not the
//! order requests arrived - the recorder runs at response-completion time.
//! `read_all` returns most-recent-first.
//!
//! ## Thread Safety
//!
//! The log is a cheap-clone handle over a mutex-guarded buffer, so every
//! in-flight request cycle can share one instance. Append, read, and
//! clear are short synchronous critical sections; nothing in here ever
//! suspends.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use guard_monitor::{LogEntry, RequestLog};
//!
//! let log = RequestLog::with_capacity(2);
//! log.record(LogEntry::new("GET", "/a", 200, Duration::ZERO));
//! log.record(LogEntry::new("GET", "/b", 200, Duration::ZERO));
//! log.record(LogEntry::new("GET", "/c", 500, Duration::ZERO));
//!
//! let entries = log.read_all();
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[0].path, "/c"); // most recent first
//! assert_eq!(entries[1].path, "/b"); // "/a" was evicted
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::entry::LogEntry;

/// Default maximum number of retained entries.
pub const DEFAULT_LOG_CAPACITY: usize = 100;

#[derive(Debug)]
struct LogBuffer {
    capacity: usize,
    entries: VecDeque<LogEntry>,
    evicted: u64,
}

/// Fixed-capacity, most-recent-first monitoring log.
///
/// Cloning produces another handle to the same buffer.
#[derive(Debug, Clone)]
pub struct RequestLog {
    inner: Arc<Mutex<LogBuffer>>,
}

impl RequestLog {
    /// Creates a log with the default capacity of
    /// [`DEFAULT_LOG_CAPACITY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Creates a log retaining at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0 (use at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        Self {
            inner: Arc::new(Mutex::new(LogBuffer {
                capacity,
                entries: VecDeque::with_capacity(capacity),
                evicted: 0,
            })),
        }
    }

    /// Appends an entry at the front, evicting the oldest entry once the
    /// sequence exceeds capacity.
    ///
    /// Returns the evicted entry if one was dropped. Called once per
    /// completed request/response cycle, whatever the outcome - entries
    /// are never partially written.
    pub fn record(&self, entry: LogEntry) -> Option<LogEntry> {
        let mut buffer = self.lock();
        buffer.entries.push_front(entry);
        if buffer.entries.len() > buffer.capacity {
            buffer.evicted += 1;
            let dropped = buffer.entries.pop_back();
            debug!(
                evicted_total = buffer.evicted,
                "monitoring log at capacity, oldest entry dropped"
            );
            dropped
        } else {
            None
        }
    }

    /// Returns a snapshot of the current entries, most recent first.
    #[must_use]
    pub fn read_all(&self) -> Vec<LogEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    /// Empties the log immediately, losing history.
    ///
    /// Returns the number of entries dropped.
    pub fn clear_all(&self) -> usize {
        let mut buffer = self.lock();
        let dropped = buffer.entries.len();
        buffer.evicted += dropped as u64;
        buffer.entries.clear();
        dropped
    }

    /// Returns the current number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns true if no entries are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Returns the maximum number of retained entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// Returns the total number of entries dropped during the lifetime of
    /// the log, capacity evictions and clears included.
    #[must_use]
    pub fn evicted_count(&self) -> u64 {
        self.lock().evicted
    }

    fn lock(&self) -> MutexGuard<'_, LogBuffer> {
        // The buffer stays consistent across a panicking holder; keep
        // serving rather than propagate the poison.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RequestLog {
    fn default() -> Self {
        Self::new()
    }
}
