//! # Guard Monitor
//!
//! Bounded observability for request/response middleware: every handled
//! cycle is recorded as an immutable [`LogEntry`] in a fixed-capacity,
//! most-recent-first [`RequestLog`] with oldest-entry eviction.
//!
//! The log supports full-sequence read and clear only - no per-entry
//! lookup - and its bound (default 100 entries) caps memory use
//! deterministically.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use guard_monitor::{LogEntry, RequestLog};
//!
//! let log = RequestLog::new();
//! log.record(LogEntry::new("POST", "/api/employees", 201, Duration::from_millis(12)));
//!
//! let entries = log.read_all();
//! assert_eq!(entries[0].status, 201);
//! assert!(entries[0].success);
//! ```

mod entry;
mod log;

pub use entry::LogEntry;
pub use log::{RequestLog, DEFAULT_LOG_CAPACITY};
