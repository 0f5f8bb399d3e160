//! Error types for `GltfKit`

use thiserror::Error;

/// The error type for `GltfKit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from stream or file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== GLB Container Errors ====================
    /// The stream looked like a GLB container but its framing is invalid.
    #[error("malformed GLB container: {message}")]
    MalformedContainer {
        /// Description of what is invalid.
        message: String,
    },

    /// The GLB container version is not supported.
    #[error("unsupported GLB version: {version} (supported: 2)")]
    UnsupportedVersion {
        /// The version number found in the header.
        version: u32,
    },

    /// The stream ended in the middle of a header or chunk body.
    #[error("truncated GLB stream while reading {context}")]
    Truncated {
        /// The part of the container being read.
        context: &'static str,
    },

    /// A chunk (or the whole container) does not fit the 32-bit length fields.
    #[error("GLB container too large: {size} bytes")]
    ContainerTooLarge {
        /// The offending size in bytes.
        size: usize,
    },

    // ==================== Document Errors ====================
    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An enumerated wire code is not one of the defined values.
    #[error("unknown {field} value: {value}")]
    UnknownEnumValue {
        /// The JSON property carrying the code.
        field: &'static str,
        /// The offending value as it appeared in the document.
        value: String,
    },

    // ==================== Resolution Errors ====================
    /// An index does not refer to an existing entry.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The kind of entity being looked up.
        kind: &'static str,
        /// The requested index.
        index: usize,
        /// The number of entries available.
        len: usize,
    },

    /// A byte range does not fit its backing storage.
    #[error("{kind} {index} overflows its backing storage: needs {required} bytes, has {available}")]
    RangeOverflow {
        /// The kind of entity being resolved.
        kind: &'static str,
        /// The index of the entity.
        index: usize,
        /// Bytes the range needs, or `usize::MAX` when the computation itself overflowed.
        required: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// The document uses a feature this crate does not decode.
    #[error("unsupported feature: {feature}")]
    UnsupportedFeature {
        /// The feature name.
        feature: &'static str,
    },

    /// The accessor cannot be resolved.
    #[error("invalid accessor {index}: {message}")]
    InvalidAccessor {
        /// The accessor index.
        index: usize,
        /// Description of what is invalid.
        message: String,
    },

    /// The embedded binary chunk is absent or a local file could not be read.
    #[error("missing resource: {message}")]
    MissingResource {
        /// Description of the missing resource.
        message: String,
    },

    /// A `data:` URI is malformed.
    #[error("invalid data URI: {message}")]
    InvalidDataUri {
        /// Description of what is invalid.
        message: String,
    },

    // ==================== Image Errors ====================
    /// The image codec rejected resolved image bytes.
    #[cfg(feature = "image")]
    #[error("failed to decode image {index}: {source}")]
    ImageDecode {
        /// The image index.
        index: usize,
        /// The codec error.
        source: image::ImageError,
    },
}

impl Error {
    pub(crate) fn missing(message: impl Into<String>) -> Self {
        Error::MissingResource { message: message.into() }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedContainer { message: message.into() }
    }

    pub(crate) fn invalid_data_uri(message: impl Into<String>) -> Self {
        Error::InvalidDataUri { message: message.into() }
    }
}

/// A specialized Result type for `GltfKit` operations.
pub type Result<T> = std::result::Result<T, Error>;
