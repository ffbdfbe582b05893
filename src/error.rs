//! Error handling for mapstack
//!
//! Every controller error is local-recoverable: the offending operation is
//! rejected and prior state is left untouched. Failed feature queries are
//! absorbed by the aggregator and never reach the user.

use thiserror::Error;

/// Result type alias for mapstack operations
pub type Result<T> = std::result::Result<T, MapstackError>;

/// Main error type for mapstack operations
#[derive(Error, Debug)]
pub enum MapstackError {
    // Catalog Errors
    #[error("Unknown layer: {name}")]
    NotFound { name: String },

    // State Transition Errors
    #[error("Layer is already active: {name}")]
    AlreadyActive { name: String },

    #[error("Layer is not active: {name}")]
    NotActive { name: String },

    #[error("The base layer cannot be deactivated or reordered: {name}")]
    ImmutableBase { name: String },

    // Index Errors
    #[error("Index {index} outside valid range [{min}, {max}]")]
    OutOfRange {
        index: usize,
        min: usize,
        max: usize,
    },

    // Query Errors
    #[error("Feature query failed: {reason}")]
    QueryFailed { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MapstackError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MapstackError::NotFound { .. } => "NOT_FOUND",
            MapstackError::AlreadyActive { .. } => "ALREADY_ACTIVE",
            MapstackError::NotActive { .. } => "NOT_ACTIVE",
            MapstackError::ImmutableBase { .. } => "IMMUTABLE_BASE",
            MapstackError::OutOfRange { .. } => "OUT_OF_RANGE",
            MapstackError::QueryFailed { .. } => "QUERY_FAILED",
            MapstackError::Io(_) => "IO_ERROR",
            MapstackError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error leaves the layer stack untouched
    pub fn is_recoverable(&self) -> bool {
        match self {
            MapstackError::NotFound { .. } => true,
            MapstackError::AlreadyActive { .. } => true,
            MapstackError::NotActive { .. } => true,
            MapstackError::ImmutableBase { .. } => true,
            MapstackError::OutOfRange { .. } => true,
            MapstackError::QueryFailed { .. } => true,
            _ => false,
        }
    }
}
