//! # Guard Filter
//!
//! Shape-driven sanitization of untrusted JSON payloads: declare which
//! fields a value may carry, and everything else - unexpected keys,
//! wrong-typed values, credential-like fields - is filtered out.
//!
//! ## Defense Layers
//!
//! | Layer | Component | Leak Prevented |
//! |-------|-----------|----------------|
//! | Whitelist | [`Shape`] + [`apply_shape`] | Unexpected/internal fields |
//! | Policy | [`SensitivePolicy`] | Credentials, even when declared |
//!
//! The two layers are independent: an incomplete shape cannot leak a
//! credential field whose name sits in the policy set, and a handler that
//! forgets to scrub credentials is still protected as long as the field
//! name is recognised.
//!
//! ## Quick Start
//!
//! ```rust
//! use guard_filter::{apply_shape, array, shape, FieldSpec, PrimitiveKind};
//! use serde_json::json;
//!
//! let user = shape([
//!     ("id", FieldSpec::Primitive(PrimitiveKind::Number)),
//!     ("name", FieldSpec::Primitive(PrimitiveKind::String)),
//! ]);
//!
//! let raw = json!({ "id": 1, "name": "John", "password": "secret123" });
//! assert_eq!(user.apply(&raw), json!({ "id": 1, "name": "John" }));
//!
//! // A list endpoint wraps its element shape:
//! let users = array(user);
//! let raw = json!([{ "id": 1, "name": "John", "token": "xxx" }]);
//! assert_eq!(apply_shape(&users, &raw), json!([{ "id": 1, "name": "John" }]));
//! ```
//!
//! ## Error Handling
//!
//! Filtering never fails: malformed or hostile input degrades to omission
//! (fail-safe, not fail-loud). The only synchronous errors are
//! [`ShapeError`] at descriptor build time and [`PolicyError`] at policy
//! configure time.

mod error;
mod filter;
mod policy;
mod spec;

pub use error::{PolicyError, ShapeError};
pub use filter::{
    apply_shape, apply_shape_with, sanitize_permissive, sanitize_permissive_with, MAX_DEPTH,
};
pub use policy::{configure, PolicyConfig, SensitivePolicy, DEFAULT_SENSITIVE_FIELDS};
pub use spec::{array, shape, FieldSpec, PrimitiveKind, Shape};
