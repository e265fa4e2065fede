//! Error handling for PathPick core types
//!
//! The coordinate engine itself is total: conversions never fail once a
//! [`FieldFrame`](crate::geometry::FieldFrame) exists. The only fallible
//! surface here is parsing configuration tokens coming from files, the
//! command line or import metadata.

use thiserror::Error;
use tracing::debug;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A configuration token did not name any known variant
    #[error("Unknown {kind}: {value}")]
    UnknownToken {
        /// What was being parsed ("measurement unit", "origin", ...).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A numeric configuration value is outside its valid range
    #[error("Invalid {name}: {value} ({reason})")]
    InvalidValue {
        /// The parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl CoreError {
    /// Shorthand for [`CoreError::UnknownToken`].
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        debug!(kind, %value, "Rejected configuration token");
        CoreError::UnknownToken { kind, value }
    }
}

/// Result type using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
