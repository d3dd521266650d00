//! # Filter Engine
//!
//! Recursive whitelist projection over untrusted JSON. Given a field spec
//! and a raw value of unknown shape, produces a new value containing only
//! declared fields whose runtime kind passes their tag check, with every
//! field name also checked against the sensitive-field policy.
//!
//! ## Threat Model
//!
//! The engine exists to prevent accidental leakage:
//!
//! - **Unexpected keys**: anything not declared in the shape is never
//!   copied. There is no mode that passes unknown keys through.
//! - **Sensitive keys**: a field name in the policy is omitted even when
//!   the shape declares it. Policy takes precedence over declaration.
//! - **Hostile structure**: wrong-typed values, non-objects where an
//!   object was declared, and pathological nesting all degrade to
//!   omission. Raising on malformed untrusted input would itself be a
//!   denial-of-service surface, so the engine never fails.
//!
//! ## Semantics
//!
//! | Spec | Raw value | Output |
//! |------|-----------|--------|
//! | `any` | present (incl. `null`) | copied verbatim |
//! | `any` | absent | omitted |
//! | primitive tag | matching kind | copied |
//! | primitive tag | wrong kind or absent | omitted |
//! | nested shape | object | recursively filtered object |
//! | nested shape | absent / non-object | empty object |
//! | array wrapper | sequence | per-element filter, original order |
//! | array wrapper | absent / non-sequence | empty sequence |
//!
//! Filtering is a projection: applying the same spec twice yields the same
//! value as applying it once. The input is never mutated.

use serde_json::{Map, Value};
use tracing::debug;

use crate::policy::SensitivePolicy;
use crate::spec::{FieldSpec, Shape};

/// Nesting depth beyond which filtering degrades to empty output.
///
/// Parsed JSON is acyclic, but attacker-controlled nesting depth must not
/// translate into unbounded recursion.
pub const MAX_DEPTH: usize = 64;

/// Filters `raw` through `spec` against the process-wide sensitive-field
/// policy.
///
/// Pure with respect to `raw`; reads the live, possibly-just-reconfigured
/// policy. Never fails - the worst case for malformed input is an empty or
/// partial result.
///
/// # Example
///
/// ```rust
/// use guard_filter::{apply_shape, shape, FieldSpec, PrimitiveKind};
/// use serde_json::json;
///
/// let user = shape([
///     ("id", FieldSpec::Primitive(PrimitiveKind::Number)),
///     ("name", FieldSpec::Primitive(PrimitiveKind::String)),
/// ]);
///
/// let raw = json!({ "id": 1, "name": "John", "password": "secret123" });
/// let safe = apply_shape(&user.into(), &raw);
/// assert_eq!(safe, json!({ "id": 1, "name": "John" }));
/// ```
#[must_use]
pub fn apply_shape(spec: &FieldSpec, raw: &Value) -> Value {
    apply_shape_with(spec, raw, SensitivePolicy::global())
}

/// Filters `raw` through `spec` against an explicit policy.
#[must_use]
pub fn apply_shape_with(spec: &FieldSpec, raw: &Value, policy: &SensitivePolicy) -> Value {
    filter_value(spec, raw, policy, 0).unwrap_or_else(|| empty_for(spec))
}

/// Strips sensitive top-level keys from an inbound payload.
///
/// The default-permissive pass used when no per-route shape is bound:
/// every field not in the policy passes through unchanged. Objects lose
/// their policy-listed keys, sequences sanitize each element, and
/// everything else is copied verbatim.
#[must_use]
pub fn sanitize_permissive(raw: &Value) -> Value {
    sanitize_permissive_with(raw, SensitivePolicy::global())
}

/// Strips sensitive top-level keys against an explicit policy.
#[must_use]
pub fn sanitize_permissive_with(raw: &Value, policy: &SensitivePolicy) -> Value {
    match raw {
        Value::Object(map) => {
            let mut out = Map::new();
            for (name, value) in map {
                if policy.contains(name) {
                    debug!(field = %name, "sensitive field stripped from inbound payload");
                    continue;
                }
                out.insert(name.clone(), value.clone());
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| sanitize_permissive_with(item, policy))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Projects one object level for [`Shape::apply`] without wrapping the
/// shape in a spec.
pub(crate) fn project(shape: &Shape, raw: &Value, policy: &SensitivePolicy) -> Value {
    Value::Object(filter_fields(shape, raw, policy, 0))
}

/// The fail-safe result for a spec whose input could not be interpreted.
fn empty_for(spec: &FieldSpec) -> Value {
    match spec {
        FieldSpec::Primitive(_) => Value::Null,
        FieldSpec::Nested(_) => Value::Object(Map::new()),
        FieldSpec::Array(_) => Value::Array(Vec::new()),
    }
}

/// Core recursion. `None` means "omit this value from the parent".
fn filter_value(
    spec: &FieldSpec,
    raw: &Value,
    policy: &SensitivePolicy,
    depth: usize,
) -> Option<Value> {
    match spec {
        FieldSpec::Primitive(kind) => kind.matches(raw).then(|| raw.clone()),
        FieldSpec::Nested(shape) => {
            if depth >= MAX_DEPTH {
                debug!(depth, "max filter depth reached, emitting empty object");
                return Some(Value::Object(Map::new()));
            }
            Some(Value::Object(filter_fields(shape, raw, policy, depth)))
        }
        FieldSpec::Array(inner) => {
            if depth >= MAX_DEPTH {
                debug!(depth, "max filter depth reached, emitting empty array");
                return Some(Value::Array(Vec::new()));
            }
            match raw {
                Value::Array(items) => Some(Value::Array(
                    items
                        .iter()
                        .filter_map(|item| filter_value(inner, item, policy, depth + 1))
                        .collect(),
                )),
                // Not a sequence where one was declared: empty, not an error.
                _ => Some(Value::Array(Vec::new())),
            }
        }
    }
}

/// Projects one object level: declared fields only, policy checked first.
fn filter_fields(
    shape: &Shape,
    raw: &Value,
    policy: &SensitivePolicy,
    depth: usize,
) -> Map<String, Value> {
    let source = raw.as_object();
    let mut out = Map::new();

    for (name, spec) in shape.fields() {
        // Policy precedence: a sensitive name is omitted unconditionally,
        // declared or not.
        if policy.contains(name) {
            debug!(field = %name, "declared field suppressed by sensitive-field policy");
            continue;
        }

        let sub = source.and_then(|map| map.get(name));
        match spec {
            FieldSpec::Primitive(_) => {
                if let Some(value) = sub {
                    if let Some(kept) = filter_value(spec, value, policy, depth + 1) {
                        out.insert(name.to_string(), kept);
                    }
                }
            }
            FieldSpec::Nested(_) | FieldSpec::Array(_) => {
                // Recursing into an absent or wrong-typed sub-value yields
                // an empty object/array rather than dropping the key.
                let sub = sub.unwrap_or(&Value::Null);
                let kept =
                    filter_value(spec, sub, policy, depth + 1).unwrap_or_else(|| empty_for(spec));
                out.insert(name.to_string(), kept);
            }
        }
    }
    out
}
