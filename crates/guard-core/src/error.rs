//! Error types for the payload-guard facade.

use thiserror::Error;

/// Result type for guard operations.
pub type Result<T> = std::result::Result<T, GuardError>;

/// Errors surfaced synchronously to integrating code.
///
/// Only construction-time and configuration-time failures appear here;
/// filtering-time anomalies always degrade to omission instead.
#[derive(Debug, Error)]
pub enum GuardError {
    /// Shape descriptor construction failed.
    #[error("shape error: {0}")]
    Shape(#[from] guard_filter::ShapeError),

    /// Sensitive-field policy configuration failed.
    #[error("policy error: {0}")]
    Policy(#[from] guard_filter::PolicyError),

    /// Guard configuration did not parse.
    #[error("configuration error: {0}")]
    Config(String),
}
