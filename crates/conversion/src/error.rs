//! Conversion errors
//!
//! Every failure surfaces to the API server as a failed conversion; nothing here
//! is retried internally.

use thiserror::Error;

/// Errors that can occur while converting a resource between API versions
#[derive(Debug, Error)]
pub enum ConversionError {
    /// JSON serialization/deserialization error (forward mapping or snapshot write)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The conversion-data annotation is present but cannot be decoded
    #[error("Corrupt conversion data in annotation {annotation}: {source}")]
    CorruptAnnotation {
        /// Annotation key that held the corrupt value
        annotation: &'static str,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A restorer key collides with (or nests inside) an already registered key
    #[error("Restorer key {key} overlaps registered key {existing}")]
    OverlappingRestorer {
        /// Key being registered
        key: String,
        /// Key already present in the registry
        existing: String,
    },

    /// The object or the requested target uses an API version that is not served
    #[error("Unsupported API version: {0}")]
    UnsupportedVersion(String),

    /// The object kind has no conversion registered
    #[error("Unsupported kind: {0}")]
    UnsupportedKind(String),

    /// The object cannot be mapped (missing type information, malformed field, ...)
    #[error("Invalid object: {0}")]
    InvalidObject(String),
}
