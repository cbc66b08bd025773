mod test_helpers;

use schemaform::schema::types::{ControlType, FieldNode, SchemaError, Validators};
use schemaform::schema::utils::{collect_controls, find_node, parent_of};
use schemaform::{EngineConfig, FieldFactory, NodePatch, SchemaStore, SchemaValidator};
use serde_json::json;

fn loaded_store() -> SchemaStore {
    test_helpers::init_logging();
    let mut store = SchemaStore::new();
    store.load_default();
    store
}

fn root_id(store: &SchemaStore) -> String {
    store.current_schema().unwrap().root.id.clone()
}

fn control_id(store: &SchemaStore, key: &str) -> String {
    collect_controls(&store.current_schema().unwrap().root)
        .into_iter()
        .find(|control| control.key == key)
        .map(|control| control.id.clone())
        .unwrap()
}

#[test]
fn test_starter_schema_uses_configured_defaults() {
    let config = EngineConfig {
        default_form_name: "Signup".to_string(),
        schema_version: "2.0".to_string(),
        ..EngineConfig::default()
    };
    let mut store = SchemaStore::with_config(config);
    assert!(store.current_schema().is_none());
    assert!(store.selected_node().is_none());

    store.load_default();
    let schema = store.current_schema().unwrap();
    assert_eq!(schema.name, "Signup");
    assert_eq!(schema.version, "2.0");
    let keys: Vec<&str> = collect_controls(&schema.root)
        .iter()
        .map(|control| control.key.as_str())
        .collect();
    assert_eq!(keys, vec!["name", "email"]);
    assert!(matches!(store.selected_node(), Some(FieldNode::Group(_))));
    assert_eq!(store.revision(), 1);
    assert!(store.last_updated().is_some());
}

#[test]
fn test_palette_add_then_update_then_remove() {
    let mut store = loaded_store();
    let root = root_id(&store);

    let control = FieldFactory::create_control(ControlType::Select, &store.current_schema().unwrap().root);
    let new_id = control.id.clone();
    assert!(store.add(&root, &FieldNode::Control(control), Some(0)));
    assert_eq!(store.current_schema().unwrap().root.children[0].id(), new_id);

    let patch = NodePatch::new(new_id.clone())
        .label("Favourite colour")
        .key("colour")
        .required(true);
    SchemaValidator::new(&store.current_schema().unwrap().root)
        .validate_patch(&patch)
        .unwrap();
    assert!(store.update(&patch));

    let updated = find_node(&store.current_schema().unwrap().root, &new_id)
        .and_then(FieldNode::as_control)
        .unwrap()
        .clone();
    assert_eq!(updated.key, "colour");
    assert_eq!(updated.label, "Favourite colour");
    assert!(updated.is_required());
    assert_eq!(updated.options.as_ref().map(Vec::len), Some(2));

    assert!(store.select(Some(new_id.as_str())));
    assert!(store.remove(&new_id));
    assert!(store.selected_node_id().is_none());
    assert!(find_node(&store.current_schema().unwrap().root, &new_id).is_none());
}

#[test]
fn test_duplicate_key_is_rejected_before_update() {
    let store = loaded_store();
    let email_id = control_id(&store, "email");
    let root = &store.current_schema().unwrap().root;

    let err = SchemaValidator::new(root)
        .validate_patch(&NodePatch::new(email_id.clone()).key("name"))
        .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateKey { ref key, .. } if key == "name"));

    // Re-using its own key is fine.
    assert!(SchemaValidator::new(root)
        .validate_patch(&NodePatch::new(email_id).key("email"))
        .is_ok());
}

#[test]
fn test_inverted_bounds_and_bad_patterns_are_rejected() {
    let store = loaded_store();
    let name_id = control_id(&store, "name");
    let validator = SchemaValidator::new(&store.current_schema().unwrap().root);

    let inverted = NodePatch::new(name_id.clone()).validators(Some(Validators {
        min_length: Some(5),
        max_length: Some(2),
        ..Default::default()
    }));
    assert!(validator.validate_patch(&inverted).is_err());

    let bad_pattern = NodePatch::new(name_id).validators(Some(Validators {
        pattern: Some("([a-z]".to_string()),
        ..Default::default()
    }));
    assert!(matches!(
        validator.validate_patch(&bad_pattern),
        Err(SchemaError::InvalidPattern { .. })
    ));
}

#[test]
fn test_move_between_groups_and_cycle_refusal() {
    let mut store = loaded_store();
    let root = root_id(&store);
    let outer = FieldFactory::create_group("Outer");
    let inner = FieldFactory::create_group("Inner");
    let (outer_id, inner_id) = (outer.id.clone(), inner.id.clone());

    assert!(store.add(&root, &FieldNode::Group(outer), None));
    assert!(store.add(&outer_id, &FieldNode::Group(inner), None));

    let name_id = control_id(&store, "name");
    assert!(store.move_node(&name_id, &inner_id, 0));
    let tree = &store.current_schema().unwrap().root;
    assert_eq!(parent_of(tree, &name_id), Some(inner_id.as_str()));

    let revision = store.revision();
    assert!(SchemaValidator::new(tree).can_move(&outer_id, &inner_id).is_err());
    assert!(!store.move_node(&outer_id, &inner_id, 0));
    assert!(!store.move_node(&outer_id, &outer_id, 0));
    assert!(!store.move_node(&root, &inner_id, 0));
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_move_to_same_parent_reorders() {
    let mut store = loaded_store();
    let root = root_id(&store);
    let name_id = control_id(&store, "name");

    assert!(store.move_node(&name_id, &root, 5));
    let keys: Vec<String> = collect_controls(&store.current_schema().unwrap().root)
        .iter()
        .map(|control| control.key.clone())
        .collect();
    assert_eq!(keys, vec!["email", "name"]);
}

#[test]
fn test_removed_ids_cannot_be_re_added() {
    let mut store = loaded_store();
    let root = root_id(&store);
    let name_id = control_id(&store, "name");
    let removed = find_node(&store.current_schema().unwrap().root, &name_id)
        .unwrap()
        .clone();

    assert!(store.remove(&name_id));
    assert!(!store.add(&root, &removed, None));

    // A fresh copy is welcome.
    let copy = FieldFactory::duplicate(&removed, &store.current_schema().unwrap().root);
    assert!(store.add(&root, &copy, None));

    // Loading a new document forgets the tombstones.
    store.load_default();
    let root = root_id(&store);
    let mut reborn = removed.clone();
    if let FieldNode::Control(control) = &mut reborn {
        control.key = "legacy_name".to_string();
    }
    assert!(store.add(&root, &reborn, None));
}

#[test]
fn test_subscribers_see_every_revision() {
    let mut store = loaded_store();
    let mut schema_events = store.subscribe_schema();
    let mut selection_events = store.subscribe_selection();
    let root = root_id(&store);
    let email_id = control_id(&store, "email");

    assert!(store.update(&NodePatch::new(root.clone()).label("Contact")));
    assert!(store.select(Some(email_id.as_str())));
    assert!(store.update(&NodePatch::new(email_id.clone()).default_value(Some(json!("a@b.com")))));

    let revisions: Vec<u64> = schema_events.drain().iter().map(|event| event.revision).collect();
    assert_eq!(revisions, vec![2, 3]);
    let selections = selection_events.drain();
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].node_id.as_deref(), Some(email_id.as_str()));

    assert_eq!(store.current_schema().unwrap().root.label, "Contact");
}
