//! Custom error types for coursetrail
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for coursetrail operations
#[derive(Error, Debug)]
pub enum CoursetrailError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A directory lookup failed (unreachable backing store, bad data)
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// The entity write succeeded but its audit record could not be stored
    #[error("Audit write failed for {entity_id}: {reason}")]
    AuditWrite { entity_id: String, reason: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoursetrailError {
    /// Create a "not found" error for offerings
    pub fn offering_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Offering",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for programs
    pub fn program_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Program",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an audit write failure
    pub fn is_audit_write(&self) -> bool {
        matches!(self, Self::AuditWrite { .. })
    }
}

impl From<std::io::Error> for CoursetrailError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CoursetrailError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for coursetrail operations
pub type CoursetrailResult<T> = Result<T, CoursetrailError>;
