//! # Integration Tests
//!
//! The monitoring log's bound, ordering, and clear semantics under
//! realistic volumes.

use std::time::Duration;

use guard_monitor::{LogEntry, RequestLog, DEFAULT_LOG_CAPACITY};

fn entry(path: &str, status: u16) -> LogEntry {
    LogEntry::new("GET", path, status, Duration::from_millis(1))
}

// ============================================================================
// Capacity Bound
// ============================================================================

#[test]
fn test_log_bounded_at_capacity() {
    let log = RequestLog::with_capacity(10);

    for i in 0..250 {
        log.record(entry(&format!("/req/{i}"), 200));
        assert!(log.len() <= 10);
    }

    assert_eq!(log.len(), 10);
    assert_eq!(log.evicted_count(), 240);
}

#[test]
fn test_retained_entries_are_exactly_the_most_recent() {
    let log = RequestLog::with_capacity(5);

    for i in 0..12 {
        log.record(entry(&format!("/req/{i}"), 200));
    }

    let paths: Vec<String> = log.read_all().into_iter().map(|e| e.path).collect();
    let expected: Vec<String> = (7..12).rev().map(|i| format!("/req/{i}")).collect();
    assert_eq!(paths, expected);
}

#[test]
fn test_default_capacity_matches_contract() {
    let log = RequestLog::new();
    for i in 0..(DEFAULT_LOG_CAPACITY + 20) {
        log.record(entry(&format!("/{i}"), 200));
    }
    assert_eq!(log.read_all().len(), DEFAULT_LOG_CAPACITY);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_most_recent_first_after_eviction() {
    let log = RequestLog::with_capacity(3);
    for path in ["/one", "/two", "/three", "/four"] {
        log.record(entry(path, 200));
    }

    let paths: Vec<String> = log.read_all().into_iter().map(|e| e.path).collect();
    assert_eq!(paths, vec!["/four", "/three", "/two"]);
}

#[test]
fn test_entries_reflect_final_outcome() {
    let log = RequestLog::new();
    log.record(entry("/ok", 204));
    log.record(entry("/missing", 404));
    log.record(entry("/boom", 500));

    let entries = log.read_all();
    assert!(!entries[0].success);
    assert!(!entries[1].success);
    assert!(entries[2].success);
}

// ============================================================================
// Clear
// ============================================================================

#[test]
fn test_clear_then_read_is_empty() {
    let log = RequestLog::with_capacity(4);
    for i in 0..4 {
        log.record(entry(&format!("/{i}"), 200));
    }

    assert_eq!(log.clear_all(), 4);
    assert!(log.read_all().is_empty());

    // The log keeps working after a clear.
    log.record(entry("/after", 200));
    assert_eq!(log.read_all().len(), 1);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_read_all_serializes_to_json() {
    let log = RequestLog::new();
    log.record(entry("/api/monitor/logs", 200));

    let json = serde_json::to_value(log.read_all()).unwrap();
    let first = &json.as_array().unwrap()[0];
    assert_eq!(first["method"], "GET");
    assert_eq!(first["path"], "/api/monitor/logs");
    assert_eq!(first["status"], 200);
    assert_eq!(first["success"], true);
    assert!(first["latency_ms"].is_number());
    assert!(first["timestamp"].is_string());
}
