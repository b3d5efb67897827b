//! Error types for schema file handling.

use argbind_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading, saving or converting a schema file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The fields do not form a valid schema.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// A field names a type outside the supported set.
    #[error("field {field}: unknown type {type_name:?}")]
    UnknownType { field: String, type_name: String },
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
