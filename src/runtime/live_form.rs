//! Reactive binding between a compiled form and its visibility rules

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

use super::compiler::{build, CompiledForm};
use super::validators::ValidationError;
use super::value_tree::{FormControl, FormGroup};
use super::visibility::{apply, evaluate, VisibilityState};
use crate::events::{Consumer, EventType, FormValueChanged, MessageBus, VisibilityChanged};
use crate::schema::types::{FieldControl, FieldGroup, FormSchema};

/// Validation failures that blocked a submission, by control key.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{} control(s) failed validation", .errors.len())]
pub struct SubmitErrors {
    pub errors: BTreeMap<String, Vec<ValidationError>>,
}

/// A compiled schema bound to its visibility rules.
///
/// Every value change re-evaluates visibility against the full raw snapshot
/// and applies it before any notification goes out, so subscribers always see
/// a settled form.
///
/// Hiding does not cascade: a hidden control keeps its value and still
/// satisfies the conditions of its dependents. A control that should vanish
/// together with its dependency must repeat that dependency's conditions.
pub struct LiveForm {
    structure: FieldGroup,
    compiled: CompiledForm,
    visibility: VisibilityState,
    bus: MessageBus,
}

impl LiveForm {
    pub fn new(schema: &FormSchema) -> Self {
        Self::with_bus(schema, MessageBus::new())
    }

    /// Compile `schema` and publish notifications on `bus`.
    pub fn with_bus(schema: &FormSchema, bus: MessageBus) -> Self {
        let compiled = build(schema);
        let mut form = Self {
            structure: schema.root.clone(),
            compiled,
            visibility: VisibilityState::default(),
            bus,
        };
        form.recompute();
        form
    }

    /// Discard the current tree and compile `schema` from scratch.
    pub fn rebuild(&mut self, schema: &FormSchema) {
        self.structure = schema.root.clone();
        self.compiled = build(schema);
        self.recompute();
        self.notify(self.visibility_event());
    }

    /// Set the value of the control `key`. Unknown keys are ignored.
    pub fn set_value(&mut self, key: &str, value: Value) -> bool {
        let Some(control) = self.compiled.value_tree.find_control_mut(key) else {
            warn!("Ignoring value for unknown control '{}'", key);
            return false;
        };
        control.set_value(value.clone());

        let changed = self.recompute();
        self.notify(FormValueChanged {
            key: key.to_string(),
            value,
        });
        if changed > 0 {
            self.notify(self.visibility_event());
        }
        true
    }

    /// Set several values, in order. Returns the keys that matched no control.
    pub fn set_values(&mut self, values: &Map<String, Value>) -> Vec<String> {
        values
            .iter()
            .filter(|(key, value)| !self.set_value(key, (*value).clone()))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Restore every seeded value.
    pub fn reset(&mut self) {
        self.compiled.value_tree.reset();
        self.recompute();
        self.notify(self.visibility_event());
    }

    /// The submission snapshot: hidden controls are omitted.
    pub fn value(&self) -> Value {
        self.compiled.value_tree.value()
    }

    /// Every value, hidden controls included.
    pub fn raw_value(&self) -> Value {
        self.compiled.value_tree.raw_value()
    }

    pub fn errors(&self) -> BTreeMap<String, Vec<ValidationError>> {
        self.compiled.value_tree.errors()
    }

    pub fn is_valid(&self) -> bool {
        self.compiled.value_tree.is_valid()
    }

    /// Validate and return the submission snapshot.
    pub fn submit(&self) -> Result<Value, SubmitErrors> {
        let errors = self.errors();
        if errors.is_empty() {
            Ok(self.value())
        } else {
            Err(SubmitErrors { errors })
        }
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn value_tree(&self) -> &FormGroup {
        &self.compiled.value_tree
    }

    pub fn control(&self, key: &str) -> Option<&FormControl> {
        self.compiled.value_tree.find_control(key)
    }

    pub fn controls_by_key(&self) -> &HashMap<String, FieldControl> {
        &self.compiled.controls_by_key
    }

    pub fn subscribe_values(&self) -> Consumer<FormValueChanged> {
        self.bus.subscribe()
    }

    pub fn subscribe_visibility(&self) -> Consumer<VisibilityChanged> {
        self.bus.subscribe()
    }

    fn recompute(&mut self) -> usize {
        let snapshot = self.compiled.value_tree.raw_value();
        self.visibility = evaluate(&self.structure, &snapshot);
        let changed = apply(&self.visibility, &mut self.compiled.value_tree);
        if changed > 0 {
            debug!("Visibility pass toggled {} control(s)", changed);
        }
        changed
    }

    fn visibility_event(&self) -> VisibilityChanged {
        VisibilityChanged {
            visible_keys: self.visibility.sorted_keys(),
            visible_groups: self.visibility.sorted_groups(),
        }
    }

    fn notify<T: EventType>(&self, event: T) {
        if let Err(e) = self.bus.publish(event) {
            warn!("Failed to publish {}: {}", T::type_id(), e);
        }
    }
}
