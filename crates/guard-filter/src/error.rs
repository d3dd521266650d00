//! Error types for shape construction and policy configuration.
//!
//! These are the only errors the crate surfaces synchronously: a malformed
//! shape descriptor fails at build time, a malformed policy configuration
//! fails at configure time. Filtering itself never errors - malformed
//! payloads degrade to omission, not failure.

use thiserror::Error;

/// Errors reported when building a shape descriptor from JSON.
///
/// Fatal to the construction call only; an existing descriptor is never
/// invalidated by a later failed construction.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The top-level shape descriptor was not a JSON object.
    #[error("shape descriptor must be a JSON object, got {kind}")]
    NotAnObject {
        /// JSON kind of the rejected value
        kind: &'static str,
    },

    /// A field spec used a primitive tag the engine does not know.
    #[error("unknown primitive tag '{tag}'")]
    UnknownTag {
        /// The rejected tag
        tag: String,
    },

    /// An array wrapper must contain exactly one element spec.
    #[error("array spec must wrap exactly one element spec, got {len} elements")]
    MalformedArray {
        /// Number of elements found
        len: usize,
    },

    /// A field spec was neither a tag, a nested object, nor an array wrapper.
    #[error("unsupported field spec: {kind}")]
    UnsupportedSpec {
        /// JSON kind of the rejected value
        kind: &'static str,
    },
}

/// Errors reported when parsing a sensitive-field policy configuration.
///
/// Misconfiguration is surfaced at configure time, never deferred to
/// filtering time.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The configured field list was not a JSON array.
    #[error("sensitiveFields must be a JSON array, got {kind}")]
    NotAList {
        /// JSON kind of the rejected value
        kind: &'static str,
    },

    /// An entry of the configured field list was not a string.
    #[error("sensitiveFields[{index}] must be a string")]
    NonStringField {
        /// Index of the offending entry
        index: usize,
    },
}
