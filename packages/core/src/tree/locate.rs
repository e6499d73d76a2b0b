//! Tree Locator - Read-Only Forest Traversal
//!
//! Depth-first lookups over an in-memory forest (the ordered list of root
//! aggregates). Node ids are globally unique across the forest, so the first
//! match of any search is the only match.
//!
//! Everything here is read-only: no function mutates the forest or any node,
//! and none of them touch persistence.

use crate::models::CategoryNode;

/// Find a node anywhere in the forest by id
///
/// Depth-first search across every root's subtree; returns the first match.
///
/// # Examples
///
/// ```rust
/// use catalog_core::models::CategoryNode;
/// use catalog_core::tree::find_node;
///
/// let mut root = CategoryNode::new("Clothing".to_string(), "clothing".to_string(), None);
/// let child = CategoryNode::new("Hoodies".to_string(), "hoodies".to_string(), None);
/// let child_id = child.id.clone();
/// root.children.push(child);
///
/// let forest = vec![root];
/// assert!(find_node(&forest, &child_id).is_some());
/// assert!(find_node(&forest, "missing").is_none());
/// ```
pub fn find_node<'a>(forest: &'a [CategoryNode], node_id: &str) -> Option<&'a CategoryNode> {
    forest
        .iter()
        .find_map(|root| find_in_subtree(root, node_id))
}

/// Find a node within one subtree by id
pub fn find_in_subtree<'a>(node: &'a CategoryNode, node_id: &str) -> Option<&'a CategoryNode> {
    if node.id == node_id {
        return Some(node);
    }
    node.children
        .iter()
        .find_map(|child| find_in_subtree(child, node_id))
}

/// Find the root aggregate whose subtree contains a node
///
/// Returns the node itself when `node_id` identifies a root. Every node
/// belongs to exactly one root, so the answer is unambiguous.
pub fn find_owning_root<'a>(forest: &'a [CategoryNode], node_id: &str) -> Option<&'a CategoryNode> {
    forest
        .iter()
        .find(|root| find_in_subtree(root, node_id).is_some())
}

/// Find the direct parent of a node within one root's subtree
///
/// Returns `None` when `node_id` is the root itself (a root has no parent) or
/// does not occur in this subtree.
pub fn find_parent<'a>(root: &'a CategoryNode, node_id: &str) -> Option<&'a CategoryNode> {
    if root.children.iter().any(|child| child.id == node_id) {
        return Some(root);
    }
    root.children
        .iter()
        .find_map(|child| find_parent(child, node_id))
}

/// Reconstruct a node's slug path from its ancestry
///
/// The root-to-node slug sequence joined by `/`. The path uniquely identifies
/// the node among siblings at each level, but is not globally unique across
/// branches: two different parents may both have a `hoodies` child.
pub fn slug_path_of(forest: &[CategoryNode], node_id: &str) -> Option<String> {
    forest.iter().find_map(|root| {
        path_in_subtree(root, node_id).map(|segments| segments.join("/"))
    })
}

fn path_in_subtree<'a>(node: &'a CategoryNode, node_id: &str) -> Option<Vec<&'a str>> {
    if node.id == node_id {
        return Some(vec![node.slug.as_str()]);
    }
    for child in &node.children {
        if let Some(mut segments) = path_in_subtree(child, node_id) {
            segments.insert(0, node.slug.as_str());
            return Some(segments);
        }
    }
    None
}

/// Resolve a slug path to a node, walking one sibling level per segment
///
/// The first segment selects a root by slug; each further segment selects a
/// child of the previous node. Used for routing lookups.
///
/// # Examples
///
/// ```rust
/// use catalog_core::models::CategoryNode;
/// use catalog_core::tree::find_by_slug_path;
///
/// let mut root = CategoryNode::new("Clothing".to_string(), "clothing".to_string(), None);
/// root.children.push(CategoryNode::new("Hoodies".to_string(), "hoodies".to_string(), None));
///
/// let forest = vec![root];
/// assert_eq!(
///     find_by_slug_path(&forest, "clothing/hoodies").map(|n| n.name.as_str()),
///     Some("Hoodies")
/// );
/// assert!(find_by_slug_path(&forest, "clothing/jackets").is_none());
/// ```
pub fn find_by_slug_path<'a>(forest: &'a [CategoryNode], path: &str) -> Option<&'a CategoryNode> {
    let mut segments = path.split('/');
    let root_slug = segments.next()?;
    let mut current = forest.iter().find(|root| root.slug == root_slug)?;
    for segment in segments {
        current = current.children.iter().find(|child| child.slug == segment)?;
    }
    Some(current)
}

/// Count the strict descendants of a node (the node itself is not counted)
///
/// Callers use this to warn before a delete, since deleting a node removes
/// its entire subtree.
pub fn descendant_count(node: &CategoryNode) -> usize {
    node.children
        .iter()
        .map(|child| 1 + descendant_count(child))
        .sum()
}
