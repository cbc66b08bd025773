//! Schema to runtime compilation.

use log::{debug, warn};
use std::collections::HashMap;

use super::validators::Validator;
use super::value_tree::{FormControl, FormGroup, FormNode};
use crate::schema::types::{ControlType, FieldControl, FieldGroup, FieldNode, FormSchema};

/// Output of [`build`]: the live tree plus the definitions behind each key.
#[derive(Debug, Clone)]
pub struct CompiledForm {
    pub value_tree: FormGroup,
    pub controls_by_key: HashMap<String, FieldControl>,
}

/// Compile `schema` into a fresh value tree.
///
/// Pure and safe to re-run on every schema change; nothing from a previous
/// build is reused.
pub fn build(schema: &FormSchema) -> CompiledForm {
    let mut controls_by_key = HashMap::new();
    let value_tree = build_group(&schema.root, &mut controls_by_key);
    debug!(
        "Compiled schema {} with {} controls",
        schema.id,
        controls_by_key.len()
    );
    CompiledForm {
        value_tree,
        controls_by_key,
    }
}

fn build_group(group: &FieldGroup, controls_by_key: &mut HashMap<String, FieldControl>) -> FormGroup {
    let children = group
        .children
        .iter()
        .map(|child| match child {
            FieldNode::Group(nested) => FormNode::Group(build_group(nested, controls_by_key)),
            FieldNode::Control(control) => {
                if controls_by_key
                    .insert(control.key.clone(), control.clone())
                    .is_some()
                {
                    warn!("Control key '{}' is used more than once; last definition wins", control.key);
                }
                FormNode::Control(build_control(control))
            }
        })
        .collect();
    FormGroup::new(group.id.clone(), children)
}

fn build_control(control: &FieldControl) -> FormControl {
    FormControl::new(
        control.key.clone(),
        control.control_type,
        control.initial_value(),
        validators_for(control),
    )
}

/// The validator list a control compiles to.
pub fn validators_for(control: &FieldControl) -> Vec<Validator> {
    let mut validators = Vec::new();

    if control.is_required() {
        validators.push(if control.control_type.is_checkbox() {
            Validator::RequiredTrue
        } else {
            Validator::Required
        });
    }
    if control.control_type == ControlType::Email {
        validators.push(Validator::Email);
    }

    if let Some(rules) = &control.validators {
        if let Some(min) = rules.min {
            validators.push(Validator::Min(min));
        }
        if let Some(max) = rules.max {
            validators.push(Validator::Max(max));
        }
        if let Some(min_length) = rules.min_length {
            validators.push(Validator::MinLength(min_length));
        }
        if let Some(max_length) = rules.max_length {
            validators.push(Validator::MaxLength(max_length));
        }
        if let Some(pattern) = &rules.pattern {
            // Authoring rejects bad patterns; one that slipped through is skipped.
            match Validator::pattern(pattern) {
                Ok(validator) => validators.push(validator),
                Err(e) => warn!(
                    "Skipping invalid pattern on control '{}': {}",
                    control.key, e
                ),
            }
        }
    }
    validators
}
