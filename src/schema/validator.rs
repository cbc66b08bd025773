use std::collections::HashMap;

use super::types::{FieldGroup, FieldNode, FormSchema, SchemaError, Validators};
use super::utils::{collect_controls, collect_ids, find_group, find_node, is_descendant};
use crate::runtime::Validator;
use crate::store::NodePatch;

/// Authoring-time checks run before a patch or move reaches the store.
///
/// The store trusts its caller; this validator is that caller's gate. It
/// rejects duplicate control keys, malformed patterns, inverted bounds and
/// moves that would put a group inside itself.
pub struct SchemaValidator<'a> {
    root: &'a FieldGroup,
}

impl<'a> SchemaValidator<'a> {
    /// Create a new validator operating on the provided tree.
    pub fn new(root: &'a FieldGroup) -> Self {
        Self { root }
    }

    /// Validate that `key` may be used by the control `control_id`.
    ///
    /// The key must be non-empty and must not be used by any other control
    /// anywhere in the tree. `control_id` may name a control that is not in
    /// the tree yet (a control about to be added).
    pub fn validate_key(&self, control_id: &str, key: &str) -> Result<(), SchemaError> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(SchemaError::invalid_field("Control key cannot be empty"));
        }
        if trimmed != key {
            return Err(SchemaError::InvalidField(format!(
                "Control key '{key}' cannot start or end with whitespace"
            )));
        }

        if let Some(existing) = collect_controls(self.root)
            .into_iter()
            .find(|control| control.key == key && control.id != control_id)
        {
            return Err(SchemaError::DuplicateKey {
                key: key.to_string(),
                existing_id: existing.id.clone(),
            });
        }
        Ok(())
    }

    /// Validate that `pattern` compiles as the whole-value expression the
    /// runtime will match with.
    pub fn validate_pattern(pattern: &str) -> Result<(), SchemaError> {
        Validator::pattern(pattern)
            .map(|_| ())
            .map_err(|e| SchemaError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    /// Validate a control's constraint set on its own.
    pub fn validate_validators(validators: &Validators) -> Result<(), SchemaError> {
        if let (Some(min), Some(max)) = (validators.min, validators.max) {
            if min > max {
                return Err(SchemaError::InvalidField(format!(
                    "min ({min}) cannot be greater than max ({max})"
                )));
            }
        }
        if let (Some(min), Some(max)) = (validators.min_length, validators.max_length) {
            if min > max {
                return Err(SchemaError::InvalidField(format!(
                    "minLength ({min}) cannot be greater than maxLength ({max})"
                )));
            }
        }
        if let Some(pattern) = &validators.pattern {
            Self::validate_pattern(pattern)?;
        }
        Ok(())
    }

    /// Validate a patch before it is handed to `SchemaStore::update`.
    pub fn validate_patch(&self, patch: &NodePatch) -> Result<(), SchemaError> {
        let node = find_node(self.root, &patch.id);
        if node.is_none() && patch.id != self.root.id {
            return Err(SchemaError::NotFound(patch.id.clone()));
        }

        if let Some(label) = &patch.label {
            if label.trim().is_empty() {
                return Err(SchemaError::invalid_field("Label cannot be empty"));
            }
        }

        if matches!(node, Some(FieldNode::Control(_))) {
            if let Some(key) = &patch.key {
                self.validate_key(&patch.id, key)?;
            }
            if let Some(Some(validators)) = &patch.validators {
                Self::validate_validators(validators)?;
            }
        }
        Ok(())
    }

    /// Whether `node_id` may be moved into `target_group_id`.
    ///
    /// The root is never movable, the target must be an existing group and
    /// the target must be neither the node itself nor one of its descendants.
    pub fn can_move(&self, node_id: &str, target_group_id: &str) -> Result<(), SchemaError> {
        if node_id == self.root.id {
            return Err(SchemaError::invalid_field("The root group cannot be moved"));
        }
        if find_node(self.root, node_id).is_none() {
            return Err(SchemaError::NotFound(node_id.to_string()));
        }
        if find_group(self.root, target_group_id).is_none() {
            return Err(SchemaError::NotFound(format!(
                "group {target_group_id}"
            )));
        }
        if is_descendant(self.root, node_id, target_group_id) {
            return Err(SchemaError::InvalidField(format!(
                "Cannot move {node_id} into itself or one of its descendants"
            )));
        }
        Ok(())
    }

    /// Audit a whole schema: unique ids, unique keys, well-formed constraints.
    pub fn validate_schema(schema: &FormSchema) -> Result<(), SchemaError> {
        if schema.id.trim().is_empty() {
            return Err(SchemaError::invalid_field("Schema id cannot be empty"));
        }

        let mut seen_ids: HashMap<String, usize> = HashMap::new();
        for id in collect_ids(&schema.root) {
            *seen_ids.entry(id).or_default() += 1;
        }
        if let Some((id, _)) = seen_ids.iter().find(|(_, count)| **count > 1) {
            return Err(SchemaError::InvalidData(format!(
                "Node id '{id}' is used more than once"
            )));
        }

        let mut seen_keys: HashMap<&str, &str> = HashMap::new();
        for control in collect_controls(&schema.root) {
            if control.key.trim().is_empty() {
                return Err(SchemaError::InvalidField(format!(
                    "Control {} has an empty key",
                    control.id
                )));
            }
            if let Some(existing_id) = seen_keys.insert(&control.key, &control.id) {
                return Err(SchemaError::DuplicateKey {
                    key: control.key.clone(),
                    existing_id: existing_id.to_string(),
                });
            }
            if let Some(validators) = &control.validators {
                Self::validate_validators(validators)?;
            }
        }
        Ok(())
    }
}
