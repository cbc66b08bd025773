/// Common constants used across the form engine.
///
/// These defaults are used for configuration and for the starter schema
/// when explicit values are not provided.
pub const DEFAULT_SCHEMA_VERSION: &str = "1.0";
pub const DEFAULT_FORM_NAME: &str = "Untitled form";
pub const ROOT_GROUP_LABEL: &str = "Form";

/// Number of formatted log lines the in-memory logger keeps.
pub const DEFAULT_LOG_BUFFER: usize = 1000;

/// Wire discriminant of a group node in the exchanged JSON document.
pub const GROUP_DISCRIMINANT: &str = "group";
