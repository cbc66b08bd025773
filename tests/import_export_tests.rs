mod test_helpers;

use schemaform::schema::types::{ControlType, FieldNode, SchemaError, Validators};
use schemaform::{FieldFactory, SchemaFileOperations, SchemaStore, SchemaValidator};
use serde_json::json;
use tempfile::tempdir;
use test_helpers::schema_builder::newsletter_schema;

#[test]
fn test_store_export_import_round_trip() {
    test_helpers::init_logging();
    let mut store = SchemaStore::new();
    store.load_default();
    let root_id = store.current_schema().unwrap().root.id.clone();
    let mut control = FieldFactory::create_control(ControlType::Number, &store.current_schema().unwrap().root);
    control.validators = Some(Validators {
        min: Some(1.0),
        max: Some(5.0),
        ..Default::default()
    });
    assert!(store.add(&root_id, &FieldNode::Control(control), None));

    let exported = store.export_json().unwrap();
    let before = store.current_schema().unwrap().clone();

    let mut other = SchemaStore::new();
    other.import_json(&exported).unwrap();
    assert_eq!(other.current_schema(), Some(&before));
    assert_eq!(other.selected_node_id(), Some(root_id.as_str()));
}

#[test]
fn test_wire_format_is_camel_case() {
    let exported = SchemaFileOperations::export_schema(&newsletter_schema()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
    let channel = &value["root"]["children"][1]["children"][0];
    assert_eq!(value["root"]["type"], json!("group"));
    assert_eq!(channel["type"], json!("control"));
    assert_eq!(channel["controlType"], json!("select"));
    assert_eq!(
        channel["visibility"]["conditions"][0],
        json!({"dependsOnKey": "subscribe", "operator": "isChecked"})
    );
}

#[test]
fn test_malformed_documents_leave_store_untouched() {
    let mut store = SchemaStore::new();
    store.load_default();
    let before = store.current_schema().unwrap().clone();
    let revision = store.revision();

    for document in [
        "not json",
        "[1, 2]",
        r#"{"name": "no id", "root": {"type": "group", "id": "r", "label": "R"}}"#,
        r#"{"id": "s"}"#,
        r#"{"id": "s", "root": {"type": "control", "id": "r", "controlType": "text", "key": "k", "label": "K"}}"#,
    ] {
        assert!(store.import_json(document).is_err(), "{}", document);
    }
    assert!(matches!(
        store.import_json(r#"{"id": "s"}"#),
        Err(SchemaError::InvalidDocument(_))
    ));
    assert_eq!(store.current_schema(), Some(&before));
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("newsletter.json");
    let schema = newsletter_schema();

    SchemaFileOperations::write_schema_file(&path, &schema).unwrap();
    let loaded = SchemaFileOperations::read_schema_file(&path).unwrap();
    assert_eq!(loaded, schema);
    SchemaValidator::validate_schema(&loaded).unwrap();
}

#[test]
fn test_audit_flags_duplicate_keys() {
    let mut schema = newsletter_schema();
    let mut copy = schema.root.children[0].clone();
    if let FieldNode::Control(control) = &mut copy {
        control.id = "another-id".to_string();
    }
    schema.root.children.push(copy);
    assert!(matches!(
        SchemaValidator::validate_schema(&schema),
        Err(SchemaError::DuplicateKey { .. })
    ));
}

#[test]
fn test_starter_schema_file_passes_audit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("form.json");
    let mut store = SchemaStore::new();
    store.load_default();

    SchemaFileOperations::write_schema_file(&path, store.current_schema().unwrap()).unwrap();
    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["root"]["type"], json!("group"));

    let loaded = SchemaFileOperations::read_schema_file(&path).unwrap();
    SchemaValidator::validate_schema(&loaded).unwrap();
    assert_eq!(Some(&loaded), store.current_schema());
}
