use thiserror::Error;

/// Errors raised while authoring, validating or importing a form schema.
///
/// Store commands never produce these; they are returned by the authoring
/// validator and the import boundary so the caller can decide how to
/// surface them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Duplicate key '{key}' is already used by control {existing_id}")]
    DuplicateKey { key: String, existing_id: String },

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid schema document: {0}")]
    InvalidDocument(String),
}

impl SchemaError {
    pub fn invalid_field<S: Into<String>>(msg: S) -> Self {
        Self::InvalidField(msg.into())
    }

    pub fn invalid_document<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDocument(msg.into())
    }
}
