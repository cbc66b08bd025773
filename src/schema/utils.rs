//! Identifier generation and read-only tree helpers for schema operations
//!
//! This module contains helper functions for:
//! - Generating stable node and schema identifiers
//! - Locating nodes and groups by id
//! - Ancestry checks used by move preconditions
//! - Collecting ids and controls across the whole tree

use crate::schema::types::{FieldControl, FieldGroup, FieldNode};
use std::collections::HashSet;
use uuid::Uuid;

/// Generate a fresh globally-unique identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Find a node by id anywhere below `root`.
///
/// The root group itself is returned as `None` because it is not a
/// `FieldNode` value; use [`find_group`] when the root must be matched too.
pub fn find_node<'a>(root: &'a FieldGroup, id: &str) -> Option<&'a FieldNode> {
    for child in &root.children {
        if child.id() == id {
            return Some(child);
        }
        if let FieldNode::Group(group) = child {
            if let Some(found) = find_node(group, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Find a group by id, including the root group.
pub fn find_group<'a>(root: &'a FieldGroup, id: &str) -> Option<&'a FieldGroup> {
    if root.id == id {
        return Some(root);
    }
    match find_node(root, id) {
        Some(FieldNode::Group(group)) => Some(group),
        _ => None,
    }
}

/// Whether `id` names the root or any node of the tree.
pub fn contains_node(root: &FieldGroup, id: &str) -> bool {
    root.id == id || find_node(root, id).is_some()
}

/// Whether `id` is `ancestor_id` itself or lies somewhere beneath it.
pub fn is_descendant(root: &FieldGroup, ancestor_id: &str, id: &str) -> bool {
    if ancestor_id == id {
        return true;
    }
    match find_group(root, ancestor_id) {
        Some(ancestor) => find_node(ancestor, id).is_some(),
        None => false,
    }
}

/// Id of the group directly holding `id`.
pub fn parent_of<'a>(root: &'a FieldGroup, id: &str) -> Option<&'a str> {
    if root.children.iter().any(|child| child.id() == id) {
        return Some(&root.id);
    }
    root.children.iter().find_map(|child| match child {
        FieldNode::Group(group) => parent_of(group, id),
        FieldNode::Control(_) => None,
    })
}

/// Every id in the tree, root included, in depth-first order.
pub fn collect_ids(root: &FieldGroup) -> Vec<String> {
    let mut ids = vec![root.id.clone()];
    for child in &root.children {
        collect_node_ids(child, &mut ids);
    }
    ids
}

/// Every id inside `node`, the node's own id first.
pub fn collect_node_ids(node: &FieldNode, ids: &mut Vec<String>) {
    ids.push(node.id().to_string());
    if let FieldNode::Group(group) = node {
        for child in &group.children {
            collect_node_ids(child, ids);
        }
    }
}

/// Every control in the tree in depth-first order.
pub fn collect_controls(root: &FieldGroup) -> Vec<&FieldControl> {
    let mut controls = Vec::new();
    push_controls(root, &mut controls);
    controls
}

fn push_controls<'a>(group: &'a FieldGroup, out: &mut Vec<&'a FieldControl>) {
    for child in &group.children {
        match child {
            FieldNode::Control(control) => out.push(control),
            FieldNode::Group(nested) => push_controls(nested, out),
        }
    }
}

/// Set of control keys currently in use.
pub fn used_keys(root: &FieldGroup) -> HashSet<String> {
    collect_controls(root)
        .into_iter()
        .map(|control| control.key.clone())
        .collect()
}
