//! Shape descriptors - declarative whitelists of field names and expected
//! kinds for untrusted payloads.
//!
//! A [`Shape`] maps field names to [`FieldSpec`]s. A field spec is either a
//! primitive type tag, a nested shape for an embedded object, or an array
//! wrapper for a homogeneous list. Shapes are pure data: they carry no
//! behavior beyond being interpretable by the filter engine, are created
//! once at service startup, and are never mutated afterwards.
//!
//! # Example
//!
//! ```rust
//! use guard_filter::{array, shape, FieldSpec, PrimitiveKind};
//!
//! let comment = shape([
//!     ("id", FieldSpec::Primitive(PrimitiveKind::Number)),
//!     ("text", FieldSpec::Primitive(PrimitiveKind::String)),
//! ]);
//!
//! let post = shape([
//!     ("id", FieldSpec::Primitive(PrimitiveKind::Number)),
//!     ("title", FieldSpec::Primitive(PrimitiveKind::String)),
//!     ("comments", array(comment)),
//! ]);
//!
//! assert_eq!(post.len(), 3);
//! ```

use serde_json::Value;

use crate::error::ShapeError;
use crate::filter;
use crate::policy::SensitivePolicy;

/// Returns the JSON kind name of a value, for error reporting.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Primitive type tags a declared field can require.
///
/// `Any` passes every present value through verbatim, including `null`.
/// The other tags admit exactly one JSON kind. Date-like values survive
/// serialization as strings or structured objects, so they satisfy `Any`
/// only - declare date and identifier fields as `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// JSON string.
    String,
    /// JSON number (integer or float).
    Number,
    /// JSON boolean.
    Boolean,
    /// Any present value, passed through unchanged.
    Any,
}

impl PrimitiveKind {
    /// Parses a primitive tag as written in a JSON shape descriptor.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    /// Returns the tag spelling of this kind.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Any => "any",
        }
    }

    /// Returns true if the runtime kind of `value` satisfies this tag.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// The closed set of field specs a shape can declare.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// A primitive type tag.
    Primitive(PrimitiveKind),
    /// A nested shape for an embedded object.
    Nested(Shape),
    /// An array wrapper: a sequence of values each matching the inner spec.
    Array(Box<FieldSpec>),
}

impl FieldSpec {
    /// Builds a field spec from its JSON representation.
    ///
    /// A string is a primitive tag, an object is a nested shape, and a
    /// one-element array wraps its element spec.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] for unknown tags, multi-element arrays, and
    /// values that are none of the three forms.
    pub fn from_json(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::String(tag) => PrimitiveKind::from_tag(tag)
                .map(Self::Primitive)
                .ok_or_else(|| ShapeError::UnknownTag { tag: tag.clone() }),
            Value::Object(_) => Shape::from_json(value).map(Self::Nested),
            Value::Array(items) => {
                if items.len() == 1 {
                    Ok(Self::Array(Box::new(Self::from_json(&items[0])?)))
                } else {
                    Err(ShapeError::MalformedArray { len: items.len() })
                }
            }
            other => Err(ShapeError::UnsupportedSpec {
                kind: json_kind(other),
            }),
        }
    }

    /// Filters `raw` through this spec against the process-wide policy.
    ///
    /// See [`crate::apply_shape`].
    #[must_use]
    pub fn apply(&self, raw: &Value) -> Value {
        filter::apply_shape(self, raw)
    }

    /// Filters `raw` through this spec against an explicit policy.
    #[must_use]
    pub fn apply_with(&self, raw: &Value, policy: &SensitivePolicy) -> Value {
        filter::apply_shape_with(self, raw, policy)
    }

    /// Returns true if this spec is an array wrapper.
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns true if this spec is a nested shape.
    #[inline]
    #[must_use]
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }
}

impl From<PrimitiveKind> for FieldSpec {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl From<Shape> for FieldSpec {
    fn from(shape: Shape) -> Self {
        Self::Nested(shape)
    }
}

/// An immutable shape descriptor: an ordered mapping of field name to
/// [`FieldSpec`].
///
/// Field names are unique within a shape; a duplicate declaration replaces
/// the earlier one at construction. Declared order is preserved for
/// deterministic iteration, but lookup is by name and order never affects
/// filtering semantics. The key set is fixed at creation - there is no way
/// to add or remove fields afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    fields: Vec<(String, FieldSpec)>,
}

impl Shape {
    /// Constructs a shape from field declarations.
    ///
    /// Never fails on well-formed input; a duplicate field name collapses
    /// to its last declaration.
    #[must_use]
    pub fn new<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldSpec)>,
        K: Into<String>,
    {
        let mut collected: Vec<(String, FieldSpec)> = Vec::new();
        for (name, spec) in fields {
            let name = name.into();
            match collected.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => *existing = spec,
                None => collected.push((name, spec)),
            }
        }
        Self { fields: collected }
    }

    /// Builds a shape from its JSON representation: an object mapping field
    /// names to field specs.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotAnObject`] when `value` is not a JSON
    /// object, or the underlying [`FieldSpec::from_json`] error for a bad
    /// field spec.
    pub fn from_json(value: &Value) -> Result<Self, ShapeError> {
        let map = value.as_object().ok_or(ShapeError::NotAnObject {
            kind: json_kind(value),
        })?;

        let mut fields = Vec::with_capacity(map.len());
        for (name, spec) in map {
            fields.push((name.clone(), FieldSpec::from_json(spec)?));
        }
        Ok(Self { fields })
    }

    /// Iterates the declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Looks up a field spec by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Returns the number of declared fields.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Filters `raw` through this shape against the process-wide policy.
    ///
    /// See [`crate::apply_shape`].
    #[must_use]
    pub fn apply(&self, raw: &Value) -> Value {
        filter::project(self, raw, SensitivePolicy::global())
    }

    /// Filters `raw` through this shape against an explicit policy.
    #[must_use]
    pub fn apply_with(&self, raw: &Value, policy: &SensitivePolicy) -> Value {
        filter::project(self, raw, policy)
    }
}

/// Constructs a [`Shape`] from field declarations.
///
/// Free-function spelling of [`Shape::new`], for route declarations that
/// read as data:
///
/// ```rust
/// use guard_filter::{shape, FieldSpec, PrimitiveKind};
///
/// let user = shape([
///     ("id", FieldSpec::Primitive(PrimitiveKind::Number)),
///     ("name", FieldSpec::Primitive(PrimitiveKind::String)),
/// ]);
/// ```
#[must_use]
pub fn shape<I, K>(fields: I) -> Shape
where
    I: IntoIterator<Item = (K, FieldSpec)>,
    K: Into<String>,
{
    Shape::new(fields)
}

/// Wraps a spec to mean "a sequence of values each matching this spec".
#[must_use]
pub fn array(spec: impl Into<FieldSpec>) -> FieldSpec {
    FieldSpec::Array(Box::new(spec.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_tag_round_trip() {
        for kind in [
            PrimitiveKind::String,
            PrimitiveKind::Number,
            PrimitiveKind::Boolean,
            PrimitiveKind::Any,
        ] {
            assert_eq!(PrimitiveKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_tag("date"), None);
    }

    #[test]
    fn test_primitive_matches() {
        assert!(PrimitiveKind::String.matches(&json!("x")));
        assert!(!PrimitiveKind::String.matches(&json!(1)));
        assert!(PrimitiveKind::Number.matches(&json!(1.5)));
        assert!(!PrimitiveKind::Number.matches(&json!("1")));
        assert!(PrimitiveKind::Boolean.matches(&json!(true)));
        assert!(!PrimitiveKind::Boolean.matches(&json!(null)));
        assert!(PrimitiveKind::Any.matches(&json!(null)));
        assert!(PrimitiveKind::Any.matches(&json!({"a": 1})));
    }

    #[test]
    fn test_shape_preserves_declaration_order() {
        let s = shape([
            ("b", FieldSpec::Primitive(PrimitiveKind::Any)),
            ("a", FieldSpec::Primitive(PrimitiveKind::Any)),
        ]);
        let names: Vec<_> = s.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_field_last_wins() {
        let s = shape([
            ("id", FieldSpec::Primitive(PrimitiveKind::Number)),
            ("id", FieldSpec::Primitive(PrimitiveKind::String)),
        ]);
        assert_eq!(s.len(), 1);
        assert_eq!(
            s.get("id"),
            Some(&FieldSpec::Primitive(PrimitiveKind::String))
        );
    }

    #[test]
    fn test_from_json_nested_and_array() {
        let value = json!({
            "id": "number",
            "author": { "id": "number", "name": "string" },
            "comments": [{ "id": "number", "text": "string" }]
        });

        let s = Shape::from_json(&value).unwrap();
        assert_eq!(s.len(), 3);
        assert!(s.get("author").unwrap().is_nested());
        assert!(s.get("comments").unwrap().is_array());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = Shape::from_json(&json!("number")).unwrap_err();
        assert!(matches!(err, ShapeError::NotAnObject { kind: "string" }));

        let err = Shape::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ShapeError::NotAnObject { kind: "array" }));
    }

    #[test]
    fn test_from_json_rejects_unknown_tag() {
        let err = Shape::from_json(&json!({ "dob": "date" })).unwrap_err();
        match err {
            ShapeError::UnknownTag { tag } => assert_eq!(tag, "date"),
            other => panic!("expected UnknownTag, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_rejects_malformed_array() {
        let err = Shape::from_json(&json!({ "tags": [] })).unwrap_err();
        assert!(matches!(err, ShapeError::MalformedArray { len: 0 }));

        let err = Shape::from_json(&json!({ "tags": ["string", "number"] })).unwrap_err();
        assert!(matches!(err, ShapeError::MalformedArray { len: 2 }));
    }

    #[test]
    fn test_from_json_rejects_unsupported_spec() {
        let err = Shape::from_json(&json!({ "id": 42 })).unwrap_err();
        assert!(matches!(err, ShapeError::UnsupportedSpec { kind: "number" }));
    }

    #[test]
    fn test_empty_shape() {
        let s = shape(Vec::<(String, FieldSpec)>::new());
        assert!(s.is_empty());
        assert_eq!(s.get("anything"), None);
    }
}
