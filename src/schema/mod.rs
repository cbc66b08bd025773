pub mod field_factory;
pub mod file_operations;
pub mod types;
pub mod utils;
pub mod validator;

pub use field_factory::FieldFactory;
pub use file_operations::SchemaFileOperations;
pub use validator::SchemaValidator;

// Re-export all types at the schema module level
pub use types::{
    Condition,
    ConditionOperator,
    ControlType,
    FieldControl,
    FieldGroup,
    FieldNode,
    FormSchema,
    SchemaError,
    SelectOption,
    Validators,
    VisibilityMode,
    VisibilityRule,
};
