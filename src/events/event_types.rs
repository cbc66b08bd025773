use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Trait for types that can be used as events in the message bus
pub trait EventType: Clone + Send + 'static {
    /// Get the unique type identifier for this event type
    fn type_id() -> &'static str;
}

/// Event indicating that the store published a new schema snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaChanged {
    /// Id of the schema now held by the store
    pub schema_id: String,
    /// Store revision after the change
    pub revision: u64,
}

/// Event indicating that the authoring selection changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionChanged {
    /// Newly selected node, `None` when the selection was cleared
    pub node_id: Option<String>,
}

/// Event indicating that a live form control received a new value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormValueChanged {
    /// Key of the control that changed
    pub key: String,
    /// The value that was set
    pub value: Value,
}

/// Event carrying the settled visibility after a recomputation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisibilityChanged {
    /// Visible control keys, sorted
    pub visible_keys: Vec<String>,
    /// Visible group ids, sorted
    pub visible_groups: Vec<String>,
}

impl EventType for SchemaChanged {
    fn type_id() -> &'static str {
        "SchemaChanged"
    }
}

impl EventType for SelectionChanged {
    fn type_id() -> &'static str {
        "SelectionChanged"
    }
}

impl EventType for FormValueChanged {
    fn type_id() -> &'static str {
        "FormValueChanged"
    }
}

impl EventType for VisibilityChanged {
    fn type_id() -> &'static str {
        "VisibilityChanged"
    }
}
