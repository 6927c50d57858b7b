//! Error types for `QuiverDB`.
//!
//! This module provides a unified error type for all collection operations.
//! Error codes follow the pattern `QVR-XXX` for easy debugging.

use thiserror::Error;

use crate::point::PointId;

/// Result type alias for `QuiverDB` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `QuiverDB` operations.
///
/// Each variant includes a descriptive error message suitable for end-users.
#[derive(Error, Debug)]
pub enum Error {
    /// String point id is not a valid UUID (QVR-001).
    #[error("[QVR-001] Point id '{0}' is not a valid UUID")]
    InvalidPointId(String),

    /// Vector name is not configured on the collection (QVR-002).
    #[error("[QVR-002] Vector '{0}' is not found in the collection")]
    VectorNameNotFound(String),

    /// Vector dimension mismatch (QVR-003).
    #[error("[QVR-003] Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Supplied vector names differ from the configured set (QVR-004).
    #[error("[QVR-004] Expected all vectors to be present: got [{provided}], configured [{expected}]")]
    VectorNamesMismatch {
        /// Configured vector names, comma-separated.
        expected: String,
        /// Supplied vector names, comma-separated.
        provided: String,
    },

    /// Columnar batch has misaligned columns (QVR-005).
    #[error("[QVR-005] Malformed batch: {0}")]
    MalformedBatch(String),

    /// Recommend was called with no positive examples (QVR-006).
    #[error("[QVR-006] Positive example list is empty")]
    NoPositiveExamples,

    /// Point id is unknown to the collection (QVR-007).
    #[error("[QVR-007] Point with id '{0}' not found")]
    PointNotFound(PointId),

    /// Malformed collection configuration (QVR-008).
    #[error("[QVR-008] Configuration error: {0}")]
    Config(String),

    /// IO error from the persistence layer (QVR-009).
    #[error("[QVR-009] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization failed in the persistence layer (QVR-010).
    #[error("[QVR-010] Serialization error: {0}")]
    Serialization(String),
}

/// Coarse error taxonomy, independent of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied a malformed or unsupported argument.
    InvalidArgument,
    /// A referenced point does not exist.
    NotFound,
    /// The collection configuration is invalid.
    Config,
    /// The persistence layer failed.
    Persistence,
}

impl Error {
    /// Returns the stable error code (e.g., "QVR-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidPointId(_) => "QVR-001",
            Self::VectorNameNotFound(_) => "QVR-002",
            Self::DimensionMismatch { .. } => "QVR-003",
            Self::VectorNamesMismatch { .. } => "QVR-004",
            Self::MalformedBatch(_) => "QVR-005",
            Self::NoPositiveExamples => "QVR-006",
            Self::PointNotFound(_) => "QVR-007",
            Self::Config(_) => "QVR-008",
            Self::Io(_) => "QVR-009",
            Self::Serialization(_) => "QVR-010",
        }
    }

    /// Returns the coarse kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPointId(_)
            | Self::VectorNameNotFound(_)
            | Self::DimensionMismatch { .. }
            | Self::VectorNamesMismatch { .. }
            | Self::MalformedBatch(_)
            | Self::NoPositiveExamples => ErrorKind::InvalidArgument,
            Self::PointNotFound(_) => ErrorKind::NotFound,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) | Self::Serialization(_) => ErrorKind::Persistence,
        }
    }
}
