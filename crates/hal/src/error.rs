//! Error types for HAL document generation.
//!
//! Every variant aborts the top-level call that raised it; no partial
//! document is ever returned. Unsupported values are not errors: they are
//! reported as [`UnsupportedValueWarning`](crate::converter::UnsupportedValueWarning)s
//! and conversion continues.

use thiserror::Error;

/// The error type for all HAL generation operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HalError {
    /// A base URL and child name did not concatenate into a valid URI.
    #[error("invalid reference '{reference}': {reason}")]
    InvalidReference {
        /// The candidate reference that failed validation.
        reference: String,
        /// Why the reference was rejected.
        reason: String,
    },

    /// A value nested deeper than the converter allows.
    #[error("document nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        /// The configured maximum nesting depth.
        max_depth: usize,
    },

    /// An embedded item has neither an `_id` nor an `id` field.
    #[error("embedded item {index} has no '_id' or 'id' field")]
    MissingIdentifier {
        /// Position of the offending item in the embedded list.
        index: usize,
    },
}

impl HalError {
    pub(crate) fn invalid_reference(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        HalError::InvalidReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
