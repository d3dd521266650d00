//! Request/response boundary types.
//!
//! The transport layer hands the guard a [`RequestContext`] per request
//! and receives a [`GuardResponse`] back; the guard performs no network
//! I/O of its own.

use std::time::{Duration, Instant};

use serde_json::Value;

/// Per-request data the transport layer exposes to the guard.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: String,
    path: String,
    body: Option<Value>,
    started: Instant,
}

impl RequestContext {
    /// Creates a context, stamping the request start time.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body,
            started: Instant::now(),
        }
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The parsed JSON body, if the request carried one.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Replaces the body (used by inbound sanitization).
    pub fn set_body(&mut self, body: Value) {
        self.body = Some(body);
    }

    /// Real elapsed time since the request started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// The status and JSON body a handler settles on.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardResponse {
    /// Response status code.
    pub status: u16,
    /// Response body, serialized by the transport after filtering.
    pub body: Value,
}

impl GuardResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Creates a 200 response.
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    /// Returns true when the status is in the 2xx-3xx range.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_accessors() {
        let ctx = RequestContext::new("POST", "/api/employees", Some(json!({ "name": "Ada" })));
        assert_eq!(ctx.method(), "POST");
        assert_eq!(ctx.path(), "/api/employees");
        assert_eq!(ctx.body().unwrap()["name"], "Ada");
    }

    #[test]
    fn test_set_body_replaces() {
        let mut ctx = RequestContext::new("POST", "/x", None);
        assert!(ctx.body().is_none());
        ctx.set_body(json!({ "clean": true }));
        assert_eq!(ctx.body().unwrap()["clean"], true);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let ctx = RequestContext::new("GET", "/x", None);
        let first = ctx.elapsed();
        let second = ctx.elapsed();
        assert!(second >= first);
    }

    #[test]
    fn test_response_success_range() {
        assert!(GuardResponse::ok(json!({})).is_success());
        assert!(GuardResponse::new(301, json!({})).is_success());
        assert!(!GuardResponse::new(404, json!({})).is_success());
        assert!(!GuardResponse::new(500, json!({})).is_success());
    }
}
