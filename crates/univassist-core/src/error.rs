//! Core error types for univassist-core.
//!
//! This module defines the error hierarchy using thiserror. Only
//! [`CoreError::NotFound`] and [`CoreError::Validation`] are meant to reach a
//! client as-is; store corruption is normally absorbed by
//! [`RecordStore::load`](crate::storage::RecordStore::load).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for univassist-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced record id does not exist in its collection
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        CoreError::NotFound { kind, id }
    }
}

/// Record store errors.
///
/// A collection file that does not exist is not an error; see
/// [`RecordStore::read`](crate::storage::RecordStore::read).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The collection file exists but could not be read
    #[error("Failed to read collection at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The collection file is not valid JSON for its record type
    #[error("Collection at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be encoded
    #[error("Failed to encode collection '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The collection file could not be written
    #[error("Failed to write collection at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Numeric input outside its accepted range
    #[error("Value {value} for '{field}' is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub fn out_of_range(field: &str, value: i64, min: i64, max: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        }
    }
}

/// A single record's timestamp could not be parsed.
///
/// Aggregation skips the record and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unparseable timestamp '{0}'")]
pub struct TimestampError(pub String);

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
