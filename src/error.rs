//! Error types for pattern schemas
//!
//! These cover collaborator-level failures only. The property tree itself
//! never fails: contract violations are logged and validation problems are
//! returned as data.

use thiserror::Error;

/// Result type for pattern schema operations
pub type Result<T> = std::result::Result<T, PatternError>;

/// Pattern schema errors
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Schema not found: {0}")]
    UnknownSchema(String),

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("Cannot resolve reference {reference}: {reason}")]
    Resolve { reference: String, reason: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
