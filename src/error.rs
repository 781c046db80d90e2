//! Error types for scene configuration.

use thiserror::Error;

/// Errors that can occur while loading or validating a [`crate::SimConfig`].
///
/// The simulation step itself never fails; every check happens at setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A physical constant is out of its allowed range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable constraint that was violated.
        reason: String,
    },

    /// A body has a zero or negative extent (would divide by zero in the lever arms).
    #[error("degenerate geometry: {body} has non-positive {dimension}")]
    ZeroExtent {
        /// Body name.
        body: &'static str,
        /// `"width"` or `"height"`.
        dimension: &'static str,
    },

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for [`crate::SimConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates an out-of-range error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
