//! Core error types for studysync-core.
//!
//! This module defines the error hierarchy using thiserror. The priority
//! engine itself is total over well-formed inputs; everything here belongs
//! to the layers around it (date parsing, store lookups, config, generator).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studysync-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Store lookups and mutations
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Date text that could not be parsed
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    /// Outline generation errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unparseable date or time-of-day text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date '{input}': expected {expected}")]
pub struct InvalidDateError {
    pub input: String,
    pub expected: &'static str,
}

impl InvalidDateError {
    pub fn new(input: impl Into<String>, expected: &'static str) -> Self {
        Self {
            input: input.into(),
            expected,
        }
    }
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field left empty
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// Percentage outside 0-100
    #[error("Progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(u32),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Store lookup and mutation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with the given id
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Attachment name not present on the record
    #[error("File '{name}' not attached to assignment {assignment_id}")]
    FileNotFound { assignment_id: String, name: String },
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Outline generation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Topic was blank
    #[error("Topic must not be empty")]
    EmptyTopic,

    /// Backend did not answer in time
    #[error("Generation timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Key point index outside the generated outline
    #[error("Key point {index} out of range (outline has {len})")]
    PointOutOfRange { index: usize, len: usize },

    /// Backend-reported failure
    #[error("Backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = StoreError::not_found("Assignment", "abc");
        assert_eq!(err.to_string(), "Assignment not found: abc");
    }

    #[test]
    fn invalid_date_is_transparent_in_core_error() {
        let err: CoreError = InvalidDateError::new("tomorrow", "YYYY-MM-DD").into();
        assert_eq!(err.to_string(), "Invalid date 'tomorrow': expected YYYY-MM-DD");
    }
}
