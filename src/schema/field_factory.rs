//! Node creation factory for the authoring palette
//!
//! Every palette button produces a node through this factory so that ids are
//! always fresh and control keys never collide with the tree they are about
//! to be added to.

use crate::schema::types::{
    ControlType, FieldControl, FieldGroup, FieldNode, SelectOption,
};
use crate::schema::utils::{generate_id, used_keys};
use serde_json::Value;
use std::collections::HashSet;

/// Factory for creating nodes with standardized starter configurations
pub struct FieldFactory;

impl FieldFactory {
    /// Create an empty group with a fresh id
    pub fn create_group(label: impl Into<String>) -> FieldGroup {
        FieldGroup::new(generate_id(), label)
    }

    /// Create a control of `control_type` whose key is unique within `root`
    pub fn create_control(control_type: ControlType, root: &FieldGroup) -> FieldControl {
        let mut taken = used_keys(root);
        Self::build_control(control_type, &mut taken)
    }

    /// Deep copy `node` with fresh ids everywhere and fresh keys for every control
    pub fn duplicate(node: &FieldNode, root: &FieldGroup) -> FieldNode {
        let mut taken = used_keys(root);
        Self::duplicate_with(node, &mut taken)
    }

    /// First `base`, `base_1`, `base_2`... not contained in `taken`
    pub fn unique_key(base: &str, taken: &HashSet<String>) -> String {
        if !taken.contains(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_else(|| format!("{base}_{}", generate_id()))
    }

    fn build_control(control_type: ControlType, taken: &mut HashSet<String>) -> FieldControl {
        let key = Self::unique_key(control_type.as_str(), taken);
        taken.insert(key.clone());

        let mut control =
            FieldControl::new(generate_id(), control_type, key, control_type.display_name());
        match control_type {
            ControlType::Select | ControlType::Radio => {
                control.options = Some(vec![
                    SelectOption::new("Option 1", "option1"),
                    SelectOption::new("Option 2", "option2"),
                ]);
            }
            ControlType::Checkbox => {
                control.default_value = Some(Value::Bool(false));
            }
            _ => {}
        }
        control
    }

    fn duplicate_with(node: &FieldNode, taken: &mut HashSet<String>) -> FieldNode {
        match node {
            FieldNode::Group(group) => FieldNode::Group(FieldGroup {
                id: generate_id(),
                label: group.label.clone(),
                children: group
                    .children
                    .iter()
                    .map(|child| Self::duplicate_with(child, taken))
                    .collect(),
            }),
            FieldNode::Control(control) => {
                let key = Self::unique_key(&format!("{}_copy", control.key), taken);
                taken.insert(key.clone());
                FieldNode::Control(FieldControl {
                    id: generate_id(),
                    key,
                    ..control.clone()
                })
            }
        }
    }
}
