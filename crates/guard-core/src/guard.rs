//! The unified payload-guard facade.
//!
//! [`PayloadGuard`] wraps the filter engine as a request/response
//! interceptor: it optionally sanitizes inbound bodies, rewrites outbound
//! JSON through the shape bound for the route, and records every
//! completed cycle in the monitoring log. It is the explicit decorator at
//! the boundary where a handler hands a value to the response transport.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use guard_filter::{apply_shape, sanitize_permissive, FieldSpec, PolicyConfig};
use guard_monitor::{LogEntry, RequestLog};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::GuardConfig;
use crate::error::Result;
use crate::exchange::{GuardResponse, RequestContext};

type RouteKey = (String, String);
type RouteTable = HashMap<RouteKey, FieldSpec>;

/// Replaces the process-wide sensitive-field policy from JSON.
///
/// # Errors
///
/// Misconfiguration (non-list, non-string entry) is reported here, at
/// configuration time.
pub fn configure_policy_json(value: &Value) -> Result<()> {
    let config = PolicyConfig::from_json(value)?;
    guard_filter::configure(config);
    Ok(())
}

/// Request/response interceptor around the filter engine.
///
/// # Pipeline
///
/// 1. **Inbound**: the raw request body is sanitized before reaching the
///    handler - through the route's bound request shape when one exists,
///    otherwise by stripping sensitive top-level keys.
/// 2. **Handler** (external): produces a status and a payload.
/// 3. **Outbound**: when a response shape is bound for the route and
///    auto-filtering is on, the payload passes through the filter engine
///    before serialization. No binding means pass-through - auto-filtering
///    only engages where a shape exists.
/// 4. **Record**: the cycle is appended to the monitoring log with the
///    status actually sent and the real elapsed latency, whatever the
///    filtering or handler outcome.
///
/// Filtering failures never block a response; the worst case is an
/// omitted field.
///
/// # Example
///
/// ```rust
/// use guard_core::{GuardConfig, GuardResponse, PayloadGuard, RequestContext};
/// use guard_core::{shape, FieldSpec, PrimitiveKind};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let guard = PayloadGuard::new(GuardConfig::default());
/// guard.bind_response_shape("GET", "/api/users", shape([
///     ("id", FieldSpec::Primitive(PrimitiveKind::Number)),
///     ("name", FieldSpec::Primitive(PrimitiveKind::String)),
/// ]));
///
/// let mut ctx = RequestContext::new("GET", "/api/users", None);
/// let response = guard
///     .intercept(&mut ctx, |_body| async {
///         GuardResponse::ok(json!({ "id": 1, "name": "Ada", "password": "x" }))
///     })
///     .await;
///
/// assert_eq!(response.body, json!({ "id": 1, "name": "Ada" }));
/// assert_eq!(guard.logs().len(), 1);
/// # });
/// ```
pub struct PayloadGuard {
    /// Configuration.
    config: GuardConfig,

    /// Per-route shapes for inbound bodies.
    request_shapes: RwLock<RouteTable>,

    /// Per-route shapes for outbound payloads.
    response_shapes: RwLock<RouteTable>,

    /// Monitoring log shared by every in-flight cycle.
    log: RequestLog,
}

impl PayloadGuard {
    /// Creates a guard with the given configuration.
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        let log = RequestLog::with_capacity(config.log_capacity);
        info!(
            sanitize_inbound = config.sanitize_inbound,
            auto_filter_outbound = config.auto_filter_outbound,
            log_capacity = config.log_capacity,
            "payload guard initialized"
        );
        Self {
            config,
            request_shapes: RwLock::new(HashMap::new()),
            response_shapes: RwLock::new(HashMap::new()),
            log,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Returns a handle to the monitoring log.
    #[must_use]
    pub fn log(&self) -> &RequestLog {
        &self.log
    }

    /// Binds a shape for the outbound payloads of a route.
    ///
    /// Bindings are declared once at service startup; the method match is
    /// case-insensitive, the path match exact.
    pub fn bind_response_shape(&self, method: &str, path: &str, spec: impl Into<FieldSpec>) {
        let key = route_key(method, path);
        debug!(method = %key.0, path = %key.1, "response shape bound");
        write_table(&self.response_shapes).insert(key, spec.into());
    }

    /// Binds a shape for the inbound bodies of a route, overriding the
    /// default permissive sanitization.
    pub fn bind_request_shape(&self, method: &str, path: &str, spec: impl Into<FieldSpec>) {
        let key = route_key(method, path);
        debug!(method = %key.0, path = %key.1, "request shape bound");
        write_table(&self.request_shapes).insert(key, spec.into());
    }

    /// Binds an outbound shape from its JSON representation.
    ///
    /// # Errors
    ///
    /// Construction errors are reported here, at build time, and are fatal
    /// to this binding only.
    pub fn bind_response_shape_json(&self, method: &str, path: &str, value: &Value) -> Result<()> {
        let spec = FieldSpec::from_json(value)?;
        self.bind_response_shape(method, path, spec);
        Ok(())
    }

    /// Sanitizes an inbound request body in place.
    ///
    /// No-op when inbound sanitization is disabled or the request carries
    /// no body. A bound request shape takes precedence over the default
    /// permissive pass.
    pub fn sanitize_request(&self, ctx: &mut RequestContext) {
        if !self.config.sanitize_inbound {
            return;
        }
        let Some(body) = ctx.body() else {
            return;
        };

        let key = route_key(ctx.method(), ctx.path());
        let bound = read_table(&self.request_shapes).get(&key).cloned();
        let sanitized = match bound {
            Some(spec) => apply_shape(&spec, body),
            None => sanitize_permissive(body),
        };

        if self.config.verbose {
            let before = top_level_keys(body);
            let after = top_level_keys(&sanitized);
            debug!(
                method = %key.0,
                path = %key.1,
                stripped = before.saturating_sub(after),
                "inbound body sanitized"
            );
        }
        ctx.set_body(sanitized);
    }

    /// Filters an outbound payload through the shape bound for the route.
    ///
    /// Pass-through when auto-filtering is disabled or no shape is bound.
    /// Never fails; degradation is field omission only.
    #[must_use]
    pub fn filter_response(&self, ctx: &RequestContext, body: Value) -> Value {
        if !self.config.auto_filter_outbound {
            return body;
        }

        let key = route_key(ctx.method(), ctx.path());
        match read_table(&self.response_shapes).get(&key) {
            Some(spec) => {
                let filtered = apply_shape(spec, &body);
                if self.config.verbose {
                    debug!(method = %key.0, path = %key.1, "outbound payload filtered");
                }
                filtered
            }
            None => body,
        }
    }

    /// Records a completed request/response cycle.
    ///
    /// Called once per cycle with the status actually sent; the latency is
    /// read from the context's start stamp.
    pub fn record(&self, ctx: &RequestContext, status: u16) {
        let entry = LogEntry::new(ctx.method(), ctx.path(), status, ctx.elapsed());
        if self.config.verbose {
            debug!(
                method = %entry.method,
                path = %entry.path,
                status = entry.status,
                latency_ms = entry.latency_ms,
                "request cycle recorded"
            );
        }
        self.log.record(entry);
    }

    /// Returns the monitoring log entries, most recent first.
    #[must_use]
    pub fn logs(&self) -> Vec<LogEntry> {
        self.log.read_all()
    }

    /// Returns the monitoring log as a JSON array, most recent first.
    #[must_use]
    pub fn logs_json(&self) -> Value {
        serde_json::to_value(self.logs()).unwrap_or_else(|_| Value::Array(Vec::new()))
    }

    /// Empties the monitoring log, returning the number of entries dropped.
    pub fn clear_logs(&self) -> usize {
        self.log.clear_all()
    }

    /// Drives a full request cycle: sanitize inbound, await the handler,
    /// filter outbound, record the outcome.
    ///
    /// The handler receives the (possibly sanitized) body and settles on
    /// whatever status and payload it likes; both are recorded faithfully,
    /// success or failure.
    pub async fn intercept<F, Fut>(&self, ctx: &mut RequestContext, handler: F) -> GuardResponse
    where
        F: FnOnce(Option<Value>) -> Fut,
        Fut: Future<Output = GuardResponse>,
    {
        self.sanitize_request(ctx);

        let response = handler(ctx.body().cloned()).await;

        let body = self.filter_response(ctx, response.body);
        let response = GuardResponse::new(response.status, body);

        self.record(ctx, response.status);
        response
    }
}

fn route_key(method: &str, path: &str) -> RouteKey {
    (method.to_ascii_uppercase(), path.to_string())
}

fn top_level_keys(value: &Value) -> usize {
    value.as_object().map_or(0, |map| map.len())
}

fn read_table(table: &RwLock<RouteTable>) -> RwLockReadGuard<'_, RouteTable> {
    table.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_table(table: &RwLock<RouteTable>) -> RwLockWriteGuard<'_, RouteTable> {
    table.write().unwrap_or_else(PoisonError::into_inner)
}
