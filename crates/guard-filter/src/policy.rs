//! # Sensitive-Field Policy
//!
//! A process-wide set of field names that must never appear in filtered
//! output, independent of any shape declaration. The policy is the second
//! defense layer: an incomplete shape cannot leak a credential field as
//! long as its name sits in this set.
//!
//! ## Semantics
//!
//! - Membership is exact and case-sensitive.
//! - Lookup is a hash-set membership test, O(1) amortised. The set is
//!   consulted once per declared field per filtering pass, so a list scan
//!   would show up on every response.
//! - [`configure`] **replaces** the process-wide set; last write wins,
//!   globally, with no versioning or scoping. The change is visible to
//!   every subsequent filtering operation, including ones using shapes
//!   built before the change. Replacing drops the built-in names unless
//!   the caller re-lists them; [`SensitivePolicy::reset`] restores the
//!   defaults.
//!
//! ## Thread Safety
//!
//! Reads and writes go through an `RwLock`. Policy mutation is a short,
//! synchronous critical section; requests suspended on I/O observe
//! whichever set was live when their filtering pass ran.

use std::collections::HashSet;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::PolicyError;
use crate::spec::json_kind;

/// Field names excluded from filtered output by default.
///
/// Common spellings of credential-like fields. Case-sensitive, so both the
/// snake_case and camelCase variants are listed where they differ.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "passwd",
    "pwd",
    "secret",
    "token",
    "api_key",
    "apiKey",
    "access_token",
    "accessToken",
    "refresh_token",
    "refreshToken",
    "authorization",
    "auth",
    "credentials",
    "private_key",
    "privateKey",
    "client_secret",
    "clientSecret",
    "session_id",
    "sessionId",
    "ssn",
];

/// A set of field names always excluded from filtered output.
///
/// The process-wide instance lives behind [`SensitivePolicy::global`];
/// explicit instances can be passed to `apply_shape_with` by callers who
/// prefer composition over ambient state.
#[derive(Debug)]
pub struct SensitivePolicy {
    fields: RwLock<HashSet<String>>,
}

impl SensitivePolicy {
    /// Creates a policy containing exactly the given field names.
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: RwLock::new(fields.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates a policy with the built-in default field names.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(DEFAULT_SENSITIVE_FIELDS.iter().copied())
    }

    /// Creates an empty policy. Every field passes; shape whitelisting is
    /// the only remaining defense layer.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    /// Returns the process-wide policy, initialised with the defaults on
    /// first access.
    #[must_use]
    pub fn global() -> &'static SensitivePolicy {
        static GLOBAL: OnceLock<SensitivePolicy> = OnceLock::new();
        GLOBAL.get_or_init(SensitivePolicy::defaults)
    }

    /// Exact, case-sensitive membership test.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.read().contains(field)
    }

    /// Replaces the entire set with the given field names.
    pub fn replace<I, S>(&self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next: HashSet<String> = fields.into_iter().map(Into::into).collect();
        debug!(fields = next.len(), "sensitive-field policy replaced");
        *self.write() = next;
    }

    /// Adds field names to the set, keeping the existing members.
    pub fn extend<I, S>(&self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.write().extend(fields.into_iter().map(Into::into));
    }

    /// Restores the built-in default field names.
    pub fn reset(&self) {
        self.replace(DEFAULT_SENSITIVE_FIELDS.iter().copied());
    }

    /// Returns the number of field names in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns a sorted copy of the current field names, for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        let mut fields: Vec<String> = self.read().iter().cloned().collect();
        fields.sort_unstable();
        fields
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashSet<String>> {
        // A poisoned lock means a panic elsewhere; the set itself is still
        // intact, and dropping protection would be the worse failure mode.
        self.fields.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashSet<String>> {
        self.fields.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SensitivePolicy {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Configuration payload for [`configure`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    /// The authoritative replacement set of sensitive field names.
    pub sensitive_fields: Vec<String>,
}

impl PolicyConfig {
    /// Creates a configuration from field names.
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sensitive_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a configuration from JSON: either a bare array of field
    /// names or an object with a `sensitiveFields` array.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] when the list is missing, not an array,
    /// or contains a non-string entry. Reported here, at configure time -
    /// never deferred to filtering time.
    pub fn from_json(value: &Value) -> Result<Self, PolicyError> {
        let list = match value {
            Value::Array(items) => items,
            Value::Object(map) => match map.get("sensitiveFields") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(PolicyError::NotAList {
                        kind: json_kind(other),
                    })
                }
                None => return Err(PolicyError::NotAList { kind: "null" }),
            },
            other => {
                return Err(PolicyError::NotAList {
                    kind: json_kind(other),
                })
            }
        };

        let mut fields = Vec::with_capacity(list.len());
        for (index, item) in list.iter().enumerate() {
            match item {
                Value::String(name) => fields.push(name.clone()),
                _ => return Err(PolicyError::NonStringField { index }),
            }
        }
        Ok(Self {
            sensitive_fields: fields,
        })
    }
}

/// Replaces the process-wide sensitive-field policy.
///
/// The provided list is authoritative: it overwrites the current set,
/// defaults included. Visible to every subsequent filtering operation.
pub fn configure(config: PolicyConfig) {
    SensitivePolicy::global().replace(config.sensitive_fields);
}
