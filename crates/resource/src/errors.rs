//! Error types for resource lookup and JSON encoding.
//!
//! These are ordinary Rust errors. They are unrelated to operation outcomes,
//! which are resources and never surface through this module.

use thiserror::Error;

/// Failure to extract a single typed resource from a [`crate::Parameters`] document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// No slot carries the requested name.
    #[error("No parameter named '{name}'")]
    NotFound {
        /// The requested slot name.
        name: String,
    },

    /// More than one slot carries the requested name.
    #[error("Parameter '{name}' is ambiguous: {count} slots share the name")]
    Ambiguous {
        /// The requested slot name.
        name: String,
        /// Number of slots with that name.
        count: usize,
    },

    /// The slot holds a primitive value instead of a resource.
    #[error("Parameter '{name}' does not hold a resource")]
    NoResource {
        /// The requested slot name.
        name: String,
    },

    /// The slot holds a resource of a different kind.
    #[error("Parameter '{name}' holds a {found}, expected a {expected}")]
    TypeMismatch {
        /// The requested slot name.
        name: String,
        /// Type tag of the requested kind.
        expected: &'static str,
        /// Type tag of the resource actually stored.
        found: String,
    },
}

/// Failure to encode or decode a resource as JSON.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to encode resource as JSON")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode resource from JSON")]
    Decode(#[source] serde_json::Error),
}
