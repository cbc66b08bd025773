//! Pure tree reducers behind the store commands.
//!
//! Each reducer takes the current root by reference and returns a freshly
//! built root, or `None` when the operation does not apply. The input tree is
//! never touched. Only the path from the root to the edited node is rebuilt;
//! every other branch is cloned as-is.

use super::patch::NodePatch;
use crate::schema::types::{FieldGroup, FieldNode};
use crate::schema::utils::is_descendant;

fn with_children(group: &FieldGroup, children: Vec<FieldNode>) -> FieldGroup {
    FieldGroup {
        id: group.id.clone(),
        label: group.label.clone(),
        children,
    }
}

fn replace_child(group: &FieldGroup, index: usize, replacement: FieldNode) -> FieldGroup {
    let children = group
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            if i == index {
                replacement.clone()
            } else {
                child.clone()
            }
        })
        .collect();
    with_children(group, children)
}

/// Shallow-merge `patch` onto the node it addresses.
pub fn update_node(group: &FieldGroup, patch: &NodePatch) -> Option<FieldGroup> {
    if group.id == patch.id {
        let mut updated = group.clone();
        if let Some(label) = &patch.label {
            updated.label = label.clone();
        }
        return Some(updated);
    }

    group
        .children
        .iter()
        .enumerate()
        .find_map(|(index, child)| {
            let replacement = if child.id() == patch.id {
                Some(patch.apply_to(child))
            } else if let FieldNode::Group(nested) = child {
                update_node(nested, patch).map(FieldNode::Group)
            } else {
                None
            };
            replacement.map(|node| replace_child(group, index, node))
        })
}

/// Insert a copy of `node` into the group `parent_id` at `index`
/// (clamped to the children length, `None` appends).
pub fn insert_node(
    group: &FieldGroup,
    parent_id: &str,
    node: &FieldNode,
    index: Option<usize>,
) -> Option<FieldGroup> {
    if group.id == parent_id {
        let mut children = group.children.clone();
        let at = index.unwrap_or(children.len()).min(children.len());
        children.insert(at, node.clone());
        return Some(with_children(group, children));
    }

    group
        .children
        .iter()
        .enumerate()
        .find_map(|(position, child)| match child {
            FieldNode::Group(nested) => insert_node(nested, parent_id, node, index)
                .map(|updated| replace_child(group, position, FieldNode::Group(updated))),
            FieldNode::Control(_) => None,
        })
}

/// Remove the node `node_id` (and its subtree). Returns the new root and the
/// detached node. The root group itself can never be removed.
pub fn remove_node(group: &FieldGroup, node_id: &str) -> Option<(FieldGroup, FieldNode)> {
    if let Some(position) = group.children.iter().position(|child| child.id() == node_id) {
        let mut children = group.children.clone();
        let removed = children.remove(position);
        return Some((with_children(group, children), removed));
    }

    group
        .children
        .iter()
        .enumerate()
        .find_map(|(position, child)| match child {
            FieldNode::Group(nested) => remove_node(nested, node_id).map(|(updated, removed)| {
                (replace_child(group, position, FieldNode::Group(updated)), removed)
            }),
            FieldNode::Control(_) => None,
        })
}

/// Detach `node_id` and re-insert it into `target_group_id` at `index`.
///
/// All or nothing: moving the root, moving a node into itself or one of its
/// descendants, an unknown node or an unknown target all yield `None`.
pub fn move_node(
    root: &FieldGroup,
    node_id: &str,
    target_group_id: &str,
    index: usize,
) -> Option<FieldGroup> {
    if node_id == root.id || is_descendant(root, node_id, target_group_id) {
        return None;
    }
    let (detached_root, node) = remove_node(root, node_id)?;
    insert_node(&detached_root, target_group_id, &node, Some(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{ControlType, FieldControl};
    use crate::schema::utils::{find_group, find_node};

    fn tree() -> FieldGroup {
        FieldGroup::new("root", "Root")
            .with_child(FieldControl::new("a", ControlType::Text, "a", "A"))
            .with_child(
                FieldGroup::new("g1", "G1")
                    .with_child(FieldControl::new("b", ControlType::Text, "b", "B"))
                    .with_child(FieldGroup::new("g2", "G2")),
            )
            .with_child(FieldControl::new("c", ControlType::Text, "c", "C"))
    }

    fn child_ids(group: &FieldGroup) -> Vec<&str> {
        group.children.iter().map(|child| child.id()).collect()
    }

    #[test]
    fn test_update_rebuilds_path_only() {
        let before = tree();
        let after = update_node(&before, &NodePatch::new("b").label("Bee")).unwrap();
        assert_eq!(find_node(&after, "b").unwrap().label(), "Bee");
        assert_eq!(find_node(&before, "b").unwrap().label(), "B");
        assert_eq!(after.children[0], before.children[0]);
        assert_eq!(after.children[2], before.children[2]);
        assert!(update_node(&before, &NodePatch::new("zzz").label("x")).is_none());
    }

    #[test]
    fn test_insert_clamps_index() {
        let before = tree();
        let node: FieldNode = FieldControl::new("d", ControlType::Text, "d", "D").into();
        let after = insert_node(&before, "g1", &node, Some(99)).unwrap();
        assert_eq!(child_ids(find_group(&after, "g1").unwrap()), vec!["b", "g2", "d"]);

        let front = insert_node(&before, "root", &node, Some(0)).unwrap();
        assert_eq!(child_ids(&front), vec!["d", "a", "g1", "c"]);

        assert!(insert_node(&before, "a", &node, None).is_none());
        assert!(insert_node(&before, "missing", &node, None).is_none());
    }

    #[test]
    fn test_remove_subtree() {
        let before = tree();
        let (after, removed) = remove_node(&before, "g1").unwrap();
        assert_eq!(removed.id(), "g1");
        assert_eq!(child_ids(&after), vec!["a", "c"]);
        assert!(find_node(&after, "b").is_none());
        assert!(remove_node(&before, "root").is_none());
    }

    #[test]
    fn test_move_between_groups() {
        let before = tree();
        let after = move_node(&before, "a", "g2", 0).unwrap();
        assert_eq!(child_ids(&after), vec!["g1", "c"]);
        assert_eq!(child_ids(find_group(&after, "g2").unwrap()), vec!["a"]);

        let reordered = move_node(&before, "c", "root", 0).unwrap();
        assert_eq!(child_ids(&reordered), vec!["c", "a", "g1"]);
    }

    #[test]
    fn test_move_refuses_cycles_and_unknown_targets() {
        let before = tree();
        assert!(move_node(&before, "g1", "g2", 0).is_none());
        assert!(move_node(&before, "g1", "g1", 0).is_none());
        assert!(move_node(&before, "root", "g1", 0).is_none());
        assert!(move_node(&before, "a", "missing", 0).is_none());
        assert!(move_node(&before, "missing", "g1", 0).is_none());
    }
}
