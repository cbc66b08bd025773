//! Visibility evaluation over a value snapshot.
//!
//! [`evaluate`] is total: unknown dependency keys, type mismatches and unknown
//! operators all make a condition false instead of failing. [`apply`] pushes
//! the result into a value tree by enabling and disabling leaves without
//! emitting anything, so applying never re-triggers an evaluation.

use serde_json::Value;
use std::collections::HashSet;

use super::value_tree::{FormControl, FormGroup};
use crate::schema::types::{
    Condition, ConditionOperator, FieldControl, FieldGroup, FieldNode, VisibilityMode,
};

/// Visible control keys and visible group ids after one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityState {
    pub visible_keys: HashSet<String>,
    pub visible_groups: HashSet<String>,
}

impl VisibilityState {
    pub fn is_visible(&self, key: &str) -> bool {
        self.visible_keys.contains(key)
    }

    pub fn is_group_visible(&self, id: &str) -> bool {
        self.visible_groups.contains(id)
    }

    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.visible_keys.iter().cloned().collect();
        keys.sort();
        keys
    }

    pub fn sorted_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.visible_groups.iter().cloned().collect();
        groups.sort();
        groups
    }
}

/// Compute visibility for the whole tree against `snapshot`.
///
/// The root group is always visible. Any other group is visible when at least
/// one of its children is.
pub fn evaluate(root: &FieldGroup, snapshot: &Value) -> VisibilityState {
    let mut state = VisibilityState::default();
    state.visible_groups.insert(root.id.clone());
    for child in &root.children {
        visit(child, snapshot, &mut state);
    }
    state
}

fn visit(node: &FieldNode, snapshot: &Value, state: &mut VisibilityState) -> bool {
    match node {
        FieldNode::Control(control) => {
            let visible = is_control_visible(control, snapshot);
            if visible {
                state.visible_keys.insert(control.key.clone());
            }
            visible
        }
        FieldNode::Group(group) => {
            // Every child is visited, no short-circuit.
            let mut any_visible = false;
            for child in &group.children {
                any_visible |= visit(child, snapshot, state);
            }
            if any_visible {
                state.visible_groups.insert(group.id.clone());
            }
            any_visible
        }
    }
}

/// Visibility of a single control.
pub fn is_control_visible(control: &FieldControl, snapshot: &Value) -> bool {
    let Some(rule) = &control.visibility else {
        return true;
    };
    if !rule.has_conditions() {
        return rule.visible_by_default;
    }
    let mut results = rule
        .conditions
        .iter()
        .map(|condition| evaluate_condition(condition, snapshot));
    match rule.mode {
        VisibilityMode::All => results.all(|holds| holds),
        VisibilityMode::Any => results.any(|holds| holds),
    }
}

/// Truth value of one condition. A missing dependency makes it false.
pub fn evaluate_condition(condition: &Condition, snapshot: &Value) -> bool {
    let Some(actual) = find_value_by_key(snapshot, &condition.depends_on_key) else {
        return false;
    };
    let expected = condition.value.as_ref().unwrap_or(&Value::Null);

    match condition.operator {
        ConditionOperator::Equals => strict_equals(actual, expected),
        ConditionOperator::NotEquals => !strict_equals(actual, expected),
        ConditionOperator::GreaterThan => match (actual.as_f64(), expected.as_f64()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        },
        ConditionOperator::LessThan => match (actual.as_f64(), expected.as_f64()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
        ConditionOperator::Includes | ConditionOperator::Contains => includes(actual, expected),
        ConditionOperator::IsChecked => actual == &Value::Bool(true),
        ConditionOperator::Unknown => false,
    }
}

/// Equality without coercion; numbers compare by numeric value.
fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Substring test for text, membership test for lists, false otherwise.
fn includes(actual: &Value, expected: &Value) -> bool {
    match actual {
        Value::String(text) => match expected {
            Value::String(needle) => text.contains(needle.as_str()),
            Value::Number(n) => text.contains(&n.to_string()),
            Value::Bool(b) => text.contains(&b.to_string()),
            _ => false,
        },
        Value::Array(items) => items.iter().any(|item| strict_equals(item, expected)),
        _ => false,
    }
}

/// Locate the leaf named `key` anywhere in a nested snapshot. The current
/// level is searched before nested groups; the first match wins.
pub fn find_value_by_key<'a>(snapshot: &'a Value, key: &str) -> Option<&'a Value> {
    let object = snapshot.as_object()?;
    if let Some(value) = object.get(key) {
        if !value.is_object() {
            return Some(value);
        }
    }
    object
        .values()
        .filter(|value| value.is_object())
        .find_map(|nested| find_value_by_key(nested, key))
}

/// Enable visible leaves and disable hidden ones. Returns how many changed.
pub fn apply(state: &VisibilityState, tree: &mut FormGroup) -> usize {
    let mut changed = 0;
    tree.for_each_control_mut(&mut |control: &mut FormControl| {
        let visible = state.visible_keys.contains(control.key());
        if visible != control.is_enabled() {
            control.set_enabled(visible);
            changed += 1;
        }
    });
    changed
}
