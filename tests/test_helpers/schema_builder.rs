#![allow(dead_code)]

use schemaform::schema::types::{
    Condition, ConditionOperator, ControlType, FieldControl, FieldGroup, FormSchema,
    VisibilityMode, VisibilityRule,
};
use serde_json::Value;

pub fn schema_with_root(root: FieldGroup) -> FormSchema {
    FormSchema {
        id: "schema-under-test".to_string(),
        name: "Test form".to_string(),
        version: "1.0".to_string(),
        root,
    }
}

pub fn text_control(key: &str) -> FieldControl {
    FieldControl::new(format!("ctl-{key}"), ControlType::Text, key, key)
}

pub fn control_of(control_type: ControlType, key: &str) -> FieldControl {
    FieldControl::new(format!("ctl-{key}"), control_type, key, key)
}

pub fn condition(key: &str, operator: ConditionOperator, value: Option<Value>) -> Condition {
    Condition::new(key, operator, value)
}

pub fn shown_when(mode: VisibilityMode, conditions: Vec<Condition>) -> VisibilityRule {
    VisibilityRule::when(mode, conditions)
}

/// Newsletter form: `channel` is only shown while `subscribe` is checked.
pub fn newsletter_schema() -> FormSchema {
    let root = FieldGroup::new("root", "Newsletter")
        .with_child(control_of(ControlType::Checkbox, "subscribe"))
        .with_child(
            FieldGroup::new("delivery", "Delivery").with_child(
                control_of(ControlType::Select, "channel")
                    .with_required(true)
                    .with_visibility(shown_when(
                        VisibilityMode::All,
                        vec![condition("subscribe", ConditionOperator::IsChecked, None)],
                    )),
            ),
        );
    schema_with_root(root)
}
