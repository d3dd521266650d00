//! Configuration types for the payload guard.

use guard_monitor::DEFAULT_LOG_CAPACITY;
use serde::{Deserialize, Serialize};

use crate::error::{GuardError, Result};

/// Configuration for the middleware adapter.
///
/// Use the builder pattern to adjust individual options.
///
/// # Example
///
/// ```rust
/// use guard_core::GuardConfig;
///
/// let config = GuardConfig::new()
///     .with_sanitize_inbound(true)
///     .with_auto_filter_outbound(true)
///     .with_verbose(false);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuardConfig {
    /// Sanitize inbound request bodies before they reach the handler.
    pub sanitize_inbound: bool,
    /// Rewrite outbound JSON responses through the bound route shape.
    pub auto_filter_outbound: bool,
    /// Development diagnostics: log what was sanitized and filtered.
    pub verbose: bool,
    /// Capacity of the monitoring log.
    pub log_capacity: usize,
}

impl GuardConfig {
    /// Creates a config with default values.
    ///
    /// Defaults:
    /// - Inbound sanitization: enabled
    /// - Outbound auto-filtering: enabled
    /// - Verbose diagnostics: disabled
    /// - Log capacity: 100 entries
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sanitize_inbound: true,
            auto_filter_outbound: true,
            verbose: false,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }

    /// Enables or disables inbound body sanitization.
    #[must_use]
    pub const fn with_sanitize_inbound(mut self, enabled: bool) -> Self {
        self.sanitize_inbound = enabled;
        self
    }

    /// Enables or disables outbound auto-filtering.
    #[must_use]
    pub const fn with_auto_filter_outbound(mut self, enabled: bool) -> Self {
        self.auto_filter_outbound = enabled;
        self
    }

    /// Enables or disables verbose diagnostics.
    #[must_use]
    pub const fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Sets the monitoring log capacity.
    #[must_use]
    pub const fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Config`] when the value does not deserialize.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| GuardError::Config(e.to_string()))
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::new()
    }
}
