//! # Schemaform
//!
//! A schema-driven form engine. Authors edit a hierarchical form schema
//! through the [`SchemaStore`]; the runtime compiles the current schema into
//! a validating value tree whose controls show and hide according to
//! declarative visibility rules.
//!
//! ## Core Components
//!
//! * `schema` - schema model, authoring validation, factory and import/export
//! * `store` - the authoring state holder and its pure tree reducers
//! * `runtime` - compiler, validators, visibility evaluator and live form
//! * `events` - typed change notifications
//! * `config` - engine configuration loaded from TOML
//! * `logging` - buffered `log` backend
//! * `error` - crate level error type

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod runtime;
pub mod schema;
pub mod store;

// Re-export main types for convenience
pub use config::{ConfigError, EngineConfig};
pub use error::{FormError, FormResult};
pub use events::MessageBus;
pub use runtime::{build, CompiledForm, LiveForm, SubmitErrors, VisibilityState};
pub use schema::{
    FieldControl, FieldFactory, FieldGroup, FieldNode, FormSchema, SchemaError,
    SchemaFileOperations, SchemaValidator,
};
pub use store::{NodePatch, SchemaStore};
