use serde::{Deserialize, Serialize};
use serde_json::json;

use super::control::{ControlType, FieldControl};
use super::node::FieldGroup;
use crate::constants::{DEFAULT_SCHEMA_VERSION, ROOT_GROUP_LABEL};
use crate::schema::utils::generate_id;

fn default_version() -> String {
    DEFAULT_SCHEMA_VERSION.to_string()
}

/// The versioned description of a whole form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(with = "super::node::tagged_group")]
    pub root: FieldGroup,
}

impl FormSchema {
    pub fn new(name: impl Into<String>, version: impl Into<String>, root: FieldGroup) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            version: version.into(),
            root,
        }
    }

    /// The canonical starter schema: one root group holding a required
    /// `name` text control and a required `email` control.
    pub fn starter(name: impl Into<String>, version: impl Into<String>) -> Self {
        let root = FieldGroup::new(generate_id(), ROOT_GROUP_LABEL)
            .with_child(
                FieldControl::new(generate_id(), ControlType::Text, "name", "Name")
                    .with_placeholder("Your name")
                    .with_required(true),
            )
            .with_child(
                FieldControl::new(generate_id(), ControlType::Email, "email", "Email")
                    .with_placeholder("you@example.com")
                    .with_required(true),
            );
        Self::new(name, version, root)
    }

    /// Compact summary used in log lines.
    pub fn describe(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.name,
            "version": self.version,
            "nodes": crate::schema::utils::collect_ids(&self.root).len(),
        })
    }
}
