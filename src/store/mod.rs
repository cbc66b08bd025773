//! Authoring store
//!
//! [`SchemaStore`] is the single owner of the canonical [`FormSchema`]. Every
//! command either publishes a brand-new snapshot (and bumps the revision) or
//! leaves the current one untouched; commands never fail loudly; they report
//! whether they applied and log why they did not.

pub mod operations;
pub mod patch;

pub use patch::NodePatch;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::error::{FormError, FormResult};
use crate::events::{Consumer, EventType, MessageBus, SchemaChanged, SelectionChanged};
use crate::schema::types::{FieldGroup, FieldNode, FormSchema, SchemaError};
use crate::schema::utils::{collect_ids, collect_node_ids, contains_node, find_group, find_node};
use crate::schema::SchemaFileOperations;

/// Owner of the current schema and the authoring selection.
pub struct SchemaStore {
    config: EngineConfig,
    current_schema: Option<FormSchema>,
    selected_node_id: Option<String>,
    revision: u64,
    last_updated: Option<DateTime<Utc>>,
    /// Ids removed from the loaded document; they must never come back.
    retired_ids: HashSet<String>,
    bus: MessageBus,
}

impl Default for SchemaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            current_schema: None,
            selected_node_id: None,
            revision: 0,
            last_updated: None,
            retired_ids: HashSet::new(),
            bus: MessageBus::new(),
        }
    }

    // ========== Projections ==========

    /// The current snapshot, if any schema is loaded.
    pub fn current_schema(&self) -> Option<&FormSchema> {
        self.current_schema.as_ref()
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        self.selected_node_id.as_deref()
    }

    /// The selected node resolved against the current tree. The root group is
    /// returned as a `FieldNode::Group`.
    pub fn selected_node(&self) -> Option<FieldNode> {
        let schema = self.current_schema.as_ref()?;
        let id = self.selected_node_id.as_deref()?;
        if schema.root.id == id {
            return Some(FieldNode::Group(schema.root.clone()));
        }
        find_node(&schema.root, id).cloned()
    }

    /// Monotonic counter bumped by every applied schema mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Wall-clock time of the last applied schema mutation.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bus(&self) -> &MessageBus {
        &self.bus
    }

    pub fn subscribe_schema(&self) -> Consumer<SchemaChanged> {
        self.bus.subscribe()
    }

    pub fn subscribe_selection(&self) -> Consumer<SelectionChanged> {
        self.bus.subscribe()
    }

    // ========== Commands ==========

    /// Replace the schema with the starter schema and select its root.
    pub fn load_default(&mut self) {
        let schema = FormSchema::starter(
            self.config.default_form_name.clone(),
            self.config.schema_version.clone(),
        );
        self.load(schema);
    }

    /// Replace the whole schema (used by import) and select its root.
    pub fn load(&mut self, schema: FormSchema) {
        info!("Loading schema {}", schema.describe());
        let root_id = schema.root.id.clone();
        self.retired_ids.clear();
        self.replace(schema);
        self.set_selection(Some(root_id));
    }

    /// Import an exchanged JSON document. On failure the current schema is
    /// left untouched and the rejection is returned.
    pub fn import_json(&mut self, document: &str) -> Result<(), SchemaError> {
        match SchemaFileOperations::import_schema(document) {
            Ok(schema) => {
                self.load(schema);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected schema import: {}", e);
                Err(e)
            }
        }
    }

    /// Export the current schema in the exchanged JSON document shape.
    pub fn export_json(&self) -> FormResult<String> {
        let schema = self.current_schema.as_ref().ok_or(FormError::NoSchema)?;
        Ok(SchemaFileOperations::export_schema(schema)?)
    }

    /// Select `id`, or clear the selection with `None`. Ids that do not
    /// resolve to a node are ignored.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.set_selection(None);
                true
            }
            Some(id) => {
                let resolves = self
                    .current_schema
                    .as_ref()
                    .is_some_and(|schema| contains_node(&schema.root, id));
                if resolves {
                    self.set_selection(Some(id.to_string()));
                } else {
                    debug!("Ignoring selection of unknown node {}", id);
                }
                resolves
            }
        }
    }

    /// Shallow-merge `patch` onto the node it addresses.
    pub fn update(&mut self, patch: &NodePatch) -> bool {
        let Some(schema) = self.current_schema.as_ref() else {
            return false;
        };
        if patch.touches_control() && find_group(&schema.root, &patch.id).is_some() {
            debug!("Control properties in patch for group {} are ignored", patch.id);
        }
        match operations::update_node(&schema.root, patch) {
            Some(root) => {
                self.commit(root);
                true
            }
            None => {
                warn!("Update ignored: node {} not found", patch.id);
                false
            }
        }
    }

    /// Insert a deep copy of `node` into the group `parent_group_id` at
    /// `index` (clamped; `None` appends).
    pub fn add(&mut self, parent_group_id: &str, node: &FieldNode, index: Option<usize>) -> bool {
        let Some(schema) = self.current_schema.as_ref() else {
            return false;
        };
        if find_group(&schema.root, parent_group_id).is_none() {
            warn!("Add ignored: group {} not found", parent_group_id);
            return false;
        }

        let mut incoming = Vec::new();
        collect_node_ids(node, &mut incoming);
        let live: HashSet<String> = collect_ids(&schema.root).into_iter().collect();
        if let Some(clash) = incoming
            .iter()
            .find(|id| live.contains(*id) || self.retired_ids.contains(*id))
        {
            warn!("Add ignored: node id {} is already in use or was removed", clash);
            return false;
        }

        match operations::insert_node(&schema.root, parent_group_id, node, index) {
            Some(root) => {
                self.commit(root);
                true
            }
            None => false,
        }
    }

    /// Remove a node and its subtree. The root cannot be removed.
    pub fn remove(&mut self, node_id: &str) -> bool {
        let Some(schema) = self.current_schema.as_ref() else {
            return false;
        };
        if schema.root.id == node_id {
            warn!("Remove ignored: the root group cannot be removed");
            return false;
        }
        let Some((root, removed)) = operations::remove_node(&schema.root, node_id) else {
            warn!("Remove ignored: node {} not found", node_id);
            return false;
        };

        let mut removed_ids = Vec::new();
        collect_node_ids(&removed, &mut removed_ids);
        let selection_removed = self
            .selected_node_id
            .as_ref()
            .is_some_and(|selected| removed_ids.contains(selected));
        self.retired_ids.extend(removed_ids);

        self.commit(root);
        if selection_removed {
            self.set_selection(None);
        }
        true
    }

    /// Move a node into `target_group_id` at `index`, all or nothing.
    pub fn move_node(&mut self, node_id: &str, target_group_id: &str, index: usize) -> bool {
        let Some(schema) = self.current_schema.as_ref() else {
            return false;
        };
        match operations::move_node(&schema.root, node_id, target_group_id, index) {
            Some(root) => {
                self.commit(root);
                true
            }
            None => {
                warn!(
                    "Move ignored: cannot move {} into {} at {}",
                    node_id, target_group_id, index
                );
                false
            }
        }
    }

    // ========== Internals ==========

    fn commit(&mut self, root: FieldGroup) {
        let Some(current) = self.current_schema.as_ref() else {
            return;
        };
        let schema = FormSchema {
            id: current.id.clone(),
            name: current.name.clone(),
            version: current.version.clone(),
            root,
        };
        self.replace(schema);
    }

    fn replace(&mut self, schema: FormSchema) {
        let schema_id = schema.id.clone();
        self.current_schema = Some(schema);
        self.revision += 1;
        self.last_updated = Some(Utc::now());
        debug!("Schema {} now at revision {}", schema_id, self.revision);
        self.notify(SchemaChanged {
            schema_id,
            revision: self.revision,
        });
    }

    fn set_selection(&mut self, node_id: Option<String>) {
        if self.selected_node_id == node_id {
            return;
        }
        self.selected_node_id = node_id.clone();
        self.notify(SelectionChanged { node_id });
    }

    fn notify<T: EventType>(&self, event: T) {
        if let Err(e) = self.bus.publish(event) {
            warn!("Failed to publish {}: {}", T::type_id(), e);
        }
    }
}
