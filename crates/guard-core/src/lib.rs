//! # Payload Guard Core
//!
//! Schema-driven payload sanitization middleware: given an untrusted,
//! dynamically-shaped JSON value, produce a filtered value containing only
//! fields explicitly declared safe, recursively, while defending against
//! accidental leakage of credentials even when a shape is missing or
//! incomplete.
//!
//! ## Defense Coverage
//!
//! | Layer | Component | Leak Prevented |
//! |-------|-----------|----------------|
//! | Whitelist | Shape descriptor + filter engine | Unexpected/internal fields |
//! | Policy | Sensitive-field policy | Credentials, even when declared |
//! | Boundary | Middleware adapter | Unfiltered bodies crossing the wire |
//! | Audit | Monitoring log | Unobserved request cycles |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       PAYLOAD GUARD CORE                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │                    ┌─────────────────┐                          │
//! │                    │  PayloadGuard   │  ← Middleware Facade     │
//! │                    └────────┬────────┘                          │
//! │                             │                                   │
//! │         ┌───────────────────┼───────────────────┐               │
//! │         ▼                   ▼                   ▼               │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐          │
//! │  │   Filter    │    │  Sensitive  │    │   Request   │          │
//! │  │   Engine    │    │   Policy    │    │     Log     │          │
//! │  └─────────────┘    └─────────────┘    └─────────────┘          │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use guard_core::{GuardConfig, GuardResponse, PayloadGuard, RequestContext};
//! use guard_core::{array, shape, FieldSpec, PrimitiveKind};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let guard = PayloadGuard::new(GuardConfig::default());
//!
//! // Routes declare their expected output shapes at startup.
//! guard.bind_response_shape("POST", "/api/employees", shape([
//!     ("id", FieldSpec::Primitive(PrimitiveKind::Any)),
//!     ("name", FieldSpec::Primitive(PrimitiveKind::String)),
//!     ("email", FieldSpec::Primitive(PrimitiveKind::String)),
//! ]));
//!
//! // Per request: sanitize → handle → filter → record.
//! let mut ctx = RequestContext::new(
//!     "POST",
//!     "/api/employees",
//!     Some(json!({ "name": "Ada", "email": "ada@example.com", "token": "t" })),
//! );
//! let response = guard
//!     .intercept(&mut ctx, |body| async move {
//!         // body no longer carries "token"
//!         GuardResponse::new(201, json!({
//!             "id": "665f...", "name": body.unwrap()["name"],
//!             "email": "ada@example.com", "password_hash": "x"
//!         }))
//!     })
//!     .await;
//!
//! assert!(response.body.get("password_hash").is_none());
//! # });
//! ```
//!
//! ## Error Handling
//!
//! Fail-safe by design: filtering-time anomalies (type mismatch, missing
//! field, non-object input) always resolve by omission, never by an error
//! response - raising on untrusted input would itself be a
//! denial-of-service surface. The only synchronous errors are shape
//! construction and policy configuration failures, surfaced as
//! [`GuardError`].

mod config;
mod error;
mod exchange;
mod guard;

pub use config::GuardConfig;
pub use error::{GuardError, Result};
pub use exchange::{GuardResponse, RequestContext};
pub use guard::{configure_policy_json, PayloadGuard};

// Re-export component types for convenience
pub use guard_filter::{
    apply_shape, apply_shape_with, array, configure as configure_policy, sanitize_permissive,
    sanitize_permissive_with, shape, FieldSpec, PolicyConfig, PolicyError, PrimitiveKind,
    SensitivePolicy, Shape, ShapeError, DEFAULT_SENSITIVE_FIELDS, MAX_DEPTH,
};
pub use guard_monitor::{LogEntry, RequestLog, DEFAULT_LOG_CAPACITY};
