//! Monitoring log entries.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One observed request/response cycle.
///
/// Created exactly once per completed cycle and never mutated afterwards.
/// `success` reflects the status actually sent: anything in the 2xx-3xx
/// range counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique entry id.
    pub id: Uuid,
    /// When the cycle completed.
    pub timestamp: DateTime<Utc>,
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Final response status code.
    pub status: u16,
    /// Real elapsed latency, in milliseconds.
    pub latency_ms: u64,
    /// True when `status` is in the 2xx-3xx range.
    pub success: bool,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    ///
    /// `latency` is the elapsed time measured from request start to
    /// response completion; the recorder must pass the real value, not
    /// the pre-handler intent.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        status: u16,
        latency: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            method: method.into(),
            path: path.into(),
            status,
            latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            success: (200..400).contains(&status),
        }
    }
}
