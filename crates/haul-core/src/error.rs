//! # Error Types
//!
//! Errors raised while constructing core primitives. Compliance rule
//! violations are not errors: they are reported as data by the rule
//! engine in `haul-compliance`.

use thiserror::Error;

/// Top-level error type for the haul stack primitives.
#[derive(Error, Debug)]
pub enum HaulError {
    /// A timestamp string could not be parsed or was not UTC.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An identifier failed validation.
    #[error("invalid {kind} identifier {value:?}: {reason}")]
    InvalidIdentifier {
        /// Identifier namespace (e.g. "driver").
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
