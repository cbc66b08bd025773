//! Import and export of the exchanged JSON schema document

use crate::constants::GROUP_DISCRIMINANT;
use crate::schema::types::{FormSchema, SchemaError};
use log::{debug, info};
use serde_json::Value;
use std::path::Path;

/// Handles the exchanged JSON document shape of a [`FormSchema`]
pub struct SchemaFileOperations;

impl SchemaFileOperations {
    /// Serialize a schema to the exchanged document shape (pretty JSON)
    pub fn export_schema(schema: &FormSchema) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(schema)
            .map_err(|e| SchemaError::InvalidData(format!("Failed to serialize schema: {}", e)))
    }

    /// Parse and structurally check an exchanged document
    ///
    /// The document must be an object carrying an `id` and a `root` whose
    /// `type` is the group discriminant. Anything else is rejected as a whole;
    /// nothing is partially loaded.
    pub fn import_schema(document: &str) -> Result<FormSchema, SchemaError> {
        let value: Value = serde_json::from_str(document)
            .map_err(|e| SchemaError::invalid_document(format!("not valid JSON: {}", e)))?;
        Self::import_value(value)
    }

    /// Same as [`Self::import_schema`] for an already parsed document
    pub fn import_value(value: Value) -> Result<FormSchema, SchemaError> {
        Self::check_document_shape(&value)?;
        let schema: FormSchema = serde_json::from_value(value)
            .map_err(|e| SchemaError::invalid_document(e.to_string()))?;
        debug!("Imported schema {}", schema.describe());
        Ok(schema)
    }

    /// The minimal structural contract of an importable document
    pub fn check_document_shape(value: &Value) -> Result<(), SchemaError> {
        let object = value
            .as_object()
            .ok_or_else(|| SchemaError::invalid_document("document must be a JSON object"))?;

        match object.get("id") {
            Some(Value::String(id)) if !id.is_empty() => {}
            Some(_) => return Err(SchemaError::invalid_document("`id` must be a non-empty string")),
            None => return Err(SchemaError::invalid_document("missing `id`")),
        }

        let root = object
            .get("root")
            .ok_or_else(|| SchemaError::invalid_document("missing `root`"))?;
        match root.get("type").and_then(Value::as_str) {
            Some(GROUP_DISCRIMINANT) => Ok(()),
            Some(other) => Err(SchemaError::InvalidDocument(format!(
                "`root.type` must be \"{}\", found \"{}\"",
                GROUP_DISCRIMINANT, other
            ))),
            None => Err(SchemaError::invalid_document("`root.type` is missing")),
        }
    }

    /// Write a schema document to `path`, creating parent directories
    pub fn write_schema_file(path: &Path, schema: &FormSchema) -> Result<(), SchemaError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SchemaError::InvalidData(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        let formatted = Self::export_schema(schema)?;
        std::fs::write(path, formatted)
            .map_err(|e| SchemaError::InvalidData(format!("Failed to write schema file: {}", e)))?;

        info!("Schema '{}' written to {}", schema.name, path.display());
        Ok(())
    }

    /// Read and import a schema document from `path`
    pub fn read_schema_file(path: &Path) -> Result<FormSchema, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::InvalidData(format!("Failed to read file {}: {}", path.display(), e))
        })?;
        Self::import_schema(&content)
    }
}
