//! Live value holders compiled from a schema.
//!
//! Groups nest under their schema group id, controls are named by their key.
//! A disabled control keeps its value but is left out of [`FormGroup::value`]
//! and of validation.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::validators::{ValidationError, Validator};
use crate::schema::types::ControlType;

/// Leaf value holder.
#[derive(Debug, Clone)]
pub struct FormControl {
    key: String,
    control_type: ControlType,
    value: Value,
    initial: Value,
    enabled: bool,
    validators: Vec<Validator>,
}

impl FormControl {
    pub fn new(
        key: impl Into<String>,
        control_type: ControlType,
        initial: Value,
        validators: Vec<Validator>,
    ) -> Self {
        Self {
            key: key.into(),
            control_type,
            value: initial.clone(),
            initial,
            enabled: true,
            validators,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn control_type(&self) -> ControlType {
        self.control_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Restore the seeded value.
    pub fn reset(&mut self) {
        self.value = self.initial.clone();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Failed constraints. Disabled controls never report errors.
    pub fn errors(&self) -> Vec<ValidationError> {
        if !self.enabled {
            return Vec::new();
        }
        self.validators
            .iter()
            .filter_map(|validator| validator.validate(&self.value))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum FormNode {
    Group(FormGroup),
    Control(FormControl),
}

impl FormNode {
    /// The name this node is published under in its parent's value.
    pub fn name(&self) -> &str {
        match self {
            FormNode::Group(group) => &group.id,
            FormNode::Control(control) => &control.key,
        }
    }

    fn is_enabled(&self) -> bool {
        match self {
            FormNode::Group(group) => group.is_enabled(),
            FormNode::Control(control) => control.is_enabled(),
        }
    }
}

/// Composite value holder.
#[derive(Debug, Clone)]
pub struct FormGroup {
    id: String,
    children: Vec<FormNode>,
}

impl FormGroup {
    pub fn new(id: impl Into<String>, children: Vec<FormNode>) -> Self {
        Self {
            id: id.into(),
            children,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn children(&self) -> &[FormNode] {
        &self.children
    }

    /// A group is enabled while it is empty or any child is enabled.
    pub fn is_enabled(&self) -> bool {
        self.children.is_empty() || self.children.iter().any(FormNode::is_enabled)
    }

    /// Every leaf value, disabled ones included.
    pub fn raw_value(&self) -> Value {
        let mut map = Map::new();
        for child in &self.children {
            let value = match child {
                FormNode::Group(group) => group.raw_value(),
                FormNode::Control(control) => control.value.clone(),
            };
            map.insert(child.name().to_string(), value);
        }
        Value::Object(map)
    }

    /// The submission value: enabled leaves only, fully disabled groups omitted.
    pub fn value(&self) -> Value {
        let mut map = Map::new();
        for child in self.children.iter().filter(|child| child.is_enabled()) {
            let value = match child {
                FormNode::Group(group) => group.value(),
                FormNode::Control(control) => control.value.clone(),
            };
            map.insert(child.name().to_string(), value);
        }
        Value::Object(map)
    }

    pub fn find_control(&self, key: &str) -> Option<&FormControl> {
        self.children.iter().find_map(|child| match child {
            FormNode::Control(control) if control.key == key => Some(control),
            FormNode::Control(_) => None,
            FormNode::Group(group) => group.find_control(key),
        })
    }

    pub fn find_control_mut(&mut self, key: &str) -> Option<&mut FormControl> {
        self.children.iter_mut().find_map(|child| match child {
            FormNode::Control(control) if control.key == key => Some(control),
            FormNode::Control(_) => None,
            FormNode::Group(group) => group.find_control_mut(key),
        })
    }

    /// All leaves in depth-first order.
    pub fn controls(&self) -> Vec<&FormControl> {
        let mut out = Vec::new();
        self.push_controls(&mut out);
        out
    }

    fn push_controls<'a>(&'a self, out: &mut Vec<&'a FormControl>) {
        for child in &self.children {
            match child {
                FormNode::Control(control) => out.push(control),
                FormNode::Group(group) => group.push_controls(out),
            }
        }
    }

    /// Visit every leaf mutably.
    pub fn for_each_control_mut<F: FnMut(&mut FormControl)>(&mut self, f: &mut F) {
        for child in &mut self.children {
            match child {
                FormNode::Control(control) => f(control),
                FormNode::Group(group) => group.for_each_control_mut(f),
            }
        }
    }

    pub fn reset(&mut self) {
        self.for_each_control_mut(&mut |control: &mut FormControl| control.reset());
    }

    /// Failed constraints of every enabled control, by key.
    pub fn errors(&self) -> BTreeMap<String, Vec<ValidationError>> {
        self.controls()
            .into_iter()
            .filter_map(|control| {
                let errors = control.errors();
                (!errors.is_empty()).then(|| (control.key.clone(), errors))
            })
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.controls().iter().all(|control| control.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> FormGroup {
        FormGroup::new(
            "root",
            vec![
                FormNode::Control(FormControl::new(
                    "name",
                    ControlType::Text,
                    json!("Ann"),
                    vec![Validator::Required],
                )),
                FormNode::Group(FormGroup::new(
                    "address",
                    vec![FormNode::Control(FormControl::new(
                        "city",
                        ControlType::Text,
                        Value::Null,
                        vec![Validator::Required],
                    ))],
                )),
                FormNode::Group(FormGroup::new("empty", Vec::new())),
            ],
        )
    }

    #[test]
    fn test_values_nest_by_group_id() {
        let form = tree();
        assert_eq!(
            form.raw_value(),
            json!({"name": "Ann", "address": {"city": null}, "empty": {}})
        );
    }

    #[test]
    fn test_disabled_leaves_and_groups_are_omitted() {
        let mut form = tree();
        form.find_control_mut("city").unwrap().set_enabled(false);
        assert_eq!(form.value(), json!({"name": "Ann", "empty": {}}));
        assert_eq!(form.raw_value()["address"], json!({"city": null}));
    }

    #[test]
    fn test_errors_skip_disabled_controls() {
        let mut form = tree();
        assert_eq!(form.errors().keys().collect::<Vec<_>>(), vec!["city"]);
        assert!(!form.is_valid());
        form.find_control_mut("city").unwrap().set_enabled(false);
        assert!(form.errors().is_empty());
        assert!(form.is_valid());
    }

    #[test]
    fn test_reset_restores_seeded_values() {
        let mut form = tree();
        form.find_control_mut("name").unwrap().set_value(json!("Bob"));
        form.reset();
        assert_eq!(form.find_control("name").unwrap().value(), &json!("Ann"));
    }
}
