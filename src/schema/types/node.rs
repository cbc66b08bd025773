use serde::{Deserialize, Serialize};

use super::control::FieldControl;

/// A node of the schema tree. The `type` tag is the wire discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldNode {
    Group(FieldGroup),
    Control(FieldControl),
}

/// An ordered container of groups and controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub children: Vec<FieldNode>,
}

/// Serde adapter writing a bare group with its `"type": "group"` tag, the
/// shape every nested group already has on the wire.
pub(crate) mod tagged_group {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{FieldGroup, FieldNode};

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum TaggedRef<'a> {
        Group(&'a FieldGroup),
    }

    pub fn serialize<S: Serializer>(group: &FieldGroup, serializer: S) -> Result<S::Ok, S::Error> {
        TaggedRef::Group(group).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FieldGroup, D::Error> {
        match FieldNode::deserialize(deserializer)? {
            FieldNode::Group(group) => Ok(group),
            FieldNode::Control(control) => Err(D::Error::custom(format!(
                "root must be a group, found control {}",
                control.id
            ))),
        }
    }
}

impl FieldGroup {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: impl Into<FieldNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: Vec<FieldNode>) -> Self {
        self.children = children;
        self
    }
}

impl FieldNode {
    pub fn id(&self) -> &str {
        match self {
            FieldNode::Group(group) => &group.id,
            FieldNode::Control(control) => &control.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FieldNode::Group(group) => &group.label,
            FieldNode::Control(control) => &control.label,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, FieldNode::Group(_))
    }

    pub fn as_group(&self) -> Option<&FieldGroup> {
        match self {
            FieldNode::Group(group) => Some(group),
            FieldNode::Control(_) => None,
        }
    }

    pub fn as_control(&self) -> Option<&FieldControl> {
        match self {
            FieldNode::Control(control) => Some(control),
            FieldNode::Group(_) => None,
        }
    }
}

impl From<FieldGroup> for FieldNode {
    fn from(group: FieldGroup) -> Self {
        FieldNode::Group(group)
    }
}

impl From<FieldControl> for FieldNode {
    fn from(control: FieldControl) -> Self {
        FieldNode::Control(control)
    }
}
