use crate::config::ConfigError;
use crate::events::MessageBusError;
use crate::schema::types::SchemaError;
use std::io;
use thiserror::Error;

/// Unified error type for the form engine.
///
/// Store commands never fail; this type covers the boundaries that do:
/// importing documents, authoring validation, configuration and file access.
#[derive(Debug, Error)]
pub enum FormError {
    /// Errors related to schema validation or import
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Errors related to configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors related to change notification
    #[error("Event error: {0}")]
    Events(#[from] MessageBusError),

    /// Errors related to IO operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation needs a loaded schema but the store holds none
    #[error("No schema is loaded")]
    NoSchema,
}

/// Result type alias for operations that can result in a FormError
pub type FormResult<T> = Result<T, FormError>;
