pub mod control;
pub mod errors;
pub mod node;
pub mod schema;
pub mod visibility;

pub use control::{ControlType, FieldControl, SelectOption, Validators};
pub use errors::SchemaError;
pub use node::{FieldGroup, FieldNode};
pub use schema::FormSchema;
pub use visibility::{Condition, ConditionOperator, VisibilityMode, VisibilityRule};
