mod test_helpers;

use schemaform::runtime::{build, evaluate, ValidationError};
use schemaform::schema::types::{
    ConditionOperator, ControlType, FieldGroup, Validators, VisibilityMode, VisibilityRule,
};
use schemaform::LiveForm;
use serde_json::json;
use test_helpers::schema_builder::{
    condition, control_of, newsletter_schema, schema_with_root, shown_when, text_control,
};

#[test]
fn test_compiled_tree_mirrors_groups() {
    test_helpers::init_logging();
    let compiled = build(&newsletter_schema());
    assert_eq!(
        compiled.value_tree.raw_value(),
        json!({"subscribe": false, "delivery": {"channel": null}})
    );
    assert_eq!(compiled.controls_by_key.len(), 2);
    assert_eq!(
        compiled.controls_by_key["channel"].control_type,
        ControlType::Select
    );
}

#[test]
fn test_validators_report_each_failure() {
    let root = FieldGroup::new("root", "Form")
        .with_child(
            control_of(ControlType::Number, "age").with_validators(Validators {
                min: Some(18.0),
                max: Some(99.0),
                ..Default::default()
            }),
        )
        .with_child(
            text_control("code")
                .with_required(true)
                .with_validators(Validators {
                    min_length: Some(3),
                    pattern: Some("[A-Z]+".to_string()),
                    ..Default::default()
                }),
        )
        .with_child(control_of(ControlType::Checkbox, "terms").with_required(true));
    let mut form = LiveForm::new(&schema_with_root(root));

    let errors = form.errors();
    assert_eq!(errors["code"], vec![ValidationError::Required]);
    assert_eq!(errors["terms"], vec![ValidationError::RequiredTrue]);
    assert!(!errors.contains_key("age"));

    form.set_value("age", json!("12"));
    form.set_value("code", json!("ab"));
    form.set_value("terms", json!(true));
    let errors = form.errors();
    assert_eq!(errors["age"], vec![ValidationError::Min { min: 18.0, actual: 12.0 }]);
    assert_eq!(
        errors["code"],
        vec![
            ValidationError::MinLength { required: 3, actual: 2 },
            ValidationError::Pattern { pattern: "[A-Z]+".to_string() },
        ]
    );

    form.set_value("age", json!(30));
    form.set_value("code", json!("ABC"));
    assert!(form.is_valid());
    assert_eq!(form.submit().unwrap(), json!({"age": 30, "code": "ABC", "terms": true}));
}

#[test]
fn test_hidden_dependency_still_drives_visibility() {
    // b depends on a, which is itself hidden by default; a keeps its value.
    let root = FieldGroup::new("root", "Form")
        .with_child(text_control("a").with_visibility(VisibilityRule::hidden()))
        .with_child(text_control("b").with_visibility(shown_when(
            VisibilityMode::All,
            vec![condition("a", ConditionOperator::Equals, Some(json!("x")))],
        )));
    let mut form = LiveForm::new(&schema_with_root(root));
    assert!(!form.visibility().is_visible("a"));

    form.set_value("a", json!("x"));
    assert!(!form.visibility().is_visible("a"));
    assert!(form.visibility().is_visible("b"));
    assert_eq!(form.value(), json!({"b": null}));
    assert_eq!(form.raw_value(), json!({"a": "x", "b": null}));
}

#[test]
fn test_nested_group_hides_when_all_children_hide() {
    let schema = newsletter_schema();
    let state = evaluate(&schema.root, &json!({"subscribe": false}));
    assert!(state.is_group_visible("root"));
    assert!(!state.is_group_visible("delivery"));
    assert!(!state.is_visible("channel"));

    let state = evaluate(&schema.root, &json!({"subscribe": true}));
    assert!(state.is_group_visible("delivery"));
    assert!(state.is_visible("channel"));
}

#[test]
fn test_conditions_on_unknown_keys_hide_the_control() {
    let root = FieldGroup::new("root", "Form").with_child(text_control("b").with_visibility(
        shown_when(
            VisibilityMode::Any,
            vec![condition("ghost", ConditionOperator::NotEquals, Some(json!("x")))],
        ),
    ));
    let form = LiveForm::new(&schema_with_root(root));
    assert!(!form.visibility().is_visible("b"));
    assert_eq!(form.submit().unwrap(), json!({}));
}

#[test]
fn test_unknown_operator_from_json_is_false() {
    let document = json!({
        "id": "s",
        "name": "Ops",
        "version": "1.0",
        "root": {
            "type": "group",
            "id": "root",
            "label": "Form",
            "children": [
                {"type": "control", "id": "c1", "controlType": "text", "key": "a", "label": "A"},
                {
                    "type": "control", "id": "c2", "controlType": "text", "key": "b", "label": "B",
                    "visibility": {
                        "visibleByDefault": true,
                        "conditions": [{"dependsOnKey": "a", "operator": "startsWith", "value": "x"}]
                    }
                }
            ]
        }
    });
    let schema = schemaform::SchemaFileOperations::import_value(document).unwrap();
    let mut form = LiveForm::new(&schema);
    form.set_value("a", json!("xyz"));
    assert!(!form.visibility().is_visible("b"));
}
