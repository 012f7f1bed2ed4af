//! Core error types for escape-core.
//!
//! Puzzle operations never fail at runtime: misuse degrades to a no-op.
//! These errors cover construction and configuration, where the host hands
//! in values the puzzles cannot work with.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for escape-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Unknown dotted key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Countdown budget must be positive
    #[error("Countdown budget must be greater than zero")]
    ZeroBudget,

    /// A band whose low bound is above its high bound
    #[error("Invalid band '{name}': low ({low}) must not exceed high ({high})")]
    InvertedBand { name: String, low: f64, high: f64 },

    /// Two rules share an id
    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(u32),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
