//! Partial node updates consumed by `SchemaStore::update`

use serde_json::Value;

use crate::schema::types::{
    ControlType, FieldNode, SelectOption, Validators, VisibilityRule,
};

/// A partial node update addressed by id.
///
/// Every `Some` field replaces the corresponding property of the target node
/// (shallow merge). For optional properties the inner `Option` lets a patch
/// clear the value: `placeholder: Some(None)` removes the placeholder.
/// Control-only properties are ignored when the target is a group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub id: String,
    pub label: Option<String>,
    pub key: Option<String>,
    pub control_type: Option<ControlType>,
    pub placeholder: Option<Option<String>>,
    pub default_value: Option<Option<Value>>,
    pub required: Option<Option<bool>>,
    pub validators: Option<Option<Validators>>,
    pub options: Option<Option<Vec<SelectOption>>>,
    pub visibility: Option<Option<VisibilityRule>>,
}

impl NodePatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn control_type(mut self, control_type: ControlType) -> Self {
        self.control_type = Some(control_type);
        self
    }

    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn default_value(mut self, value: Option<Value>) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(Some(required));
        self
    }

    pub fn validators(mut self, validators: Option<Validators>) -> Self {
        self.validators = Some(validators);
        self
    }

    pub fn options(mut self, options: Option<Vec<SelectOption>>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn visibility(mut self, visibility: Option<VisibilityRule>) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Whether the patch touches any control-only property.
    pub fn touches_control(&self) -> bool {
        self.key.is_some()
            || self.control_type.is_some()
            || self.placeholder.is_some()
            || self.default_value.is_some()
            || self.required.is_some()
            || self.validators.is_some()
            || self.options.is_some()
            || self.visibility.is_some()
    }

    /// Produce the merged copy of `node`. The id is never changed.
    pub fn apply_to(&self, node: &FieldNode) -> FieldNode {
        match node {
            FieldNode::Group(group) => {
                let mut group = group.clone();
                if let Some(label) = &self.label {
                    group.label = label.clone();
                }
                FieldNode::Group(group)
            }
            FieldNode::Control(control) => {
                let mut control = control.clone();
                if let Some(label) = &self.label {
                    control.label = label.clone();
                }
                if let Some(key) = &self.key {
                    control.key = key.clone();
                }
                if let Some(control_type) = self.control_type {
                    control.control_type = control_type;
                }
                if let Some(placeholder) = &self.placeholder {
                    control.placeholder = placeholder.clone();
                }
                if let Some(default_value) = &self.default_value {
                    control.default_value = default_value.clone();
                }
                if let Some(required) = self.required {
                    control.required = required;
                }
                if let Some(validators) = &self.validators {
                    control.validators = validators.clone();
                }
                if let Some(options) = &self.options {
                    control.options = options.clone();
                }
                if let Some(visibility) = &self.visibility {
                    control.visibility = visibility.clone();
                }
                FieldNode::Control(control)
            }
        }
    }
}
