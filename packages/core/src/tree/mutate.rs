//! Tree Mutator - Pure Structural Edits on a Root Aggregate
//!
//! The three mutations (insert a child, replace a node's fields, remove a
//! subtree) all share one generic recursive rebuild: walk the aggregate, and
//! at the first node satisfying a predicate, apply a transform; rebuild the
//! children sequence from the (possibly unchanged) recursive results on the
//! way back up. One implementation covers arbitrary depth.
//!
//! All operations take the root by value and return a new root; callers that
//! need the original intact clone before calling. `updated_at` is refreshed
//! at the transformed node and along the spine of ancestors up to the root.
//!
//! Nothing here touches persistence and nothing here can fail with a store
//! error; the only failure mode is "target not in this aggregate", reported
//! as `None`. The caller is expected to have resolved the owning root first
//! (see `tree::locate`), so `None` indicates a caller bug or a stale forest.

use crate::models::CategoryNode;
use chrono::{DateTime, Utc};

/// Rebuild an aggregate, transforming the first node matching `is_match`
///
/// Returns the rebuilt aggregate and whether a match was found. The transform
/// runs at most once: the walk short-circuits after the first match (ids are
/// globally unique, so a second match cannot exist for id predicates).
/// `updated_at` is set to `now` on the transformed node and every ancestor on
/// the path back to the root.
fn map_first_match<P, F>(
    mut node: CategoryNode,
    is_match: &P,
    transform: &mut F,
    now: DateTime<Utc>,
) -> (CategoryNode, bool)
where
    P: Fn(&CategoryNode) -> bool,
    F: FnMut(CategoryNode) -> CategoryNode,
{
    if is_match(&node) {
        let mut transformed = transform(node);
        transformed.updated_at = now;
        return (transformed, true);
    }

    let children = std::mem::take(&mut node.children);
    let mut matched = false;
    node.children = children
        .into_iter()
        .map(|child| {
            if matched {
                return child;
            }
            let (rebuilt, hit) = map_first_match(child, is_match, transform, now);
            matched |= hit;
            rebuilt
        })
        .collect();

    if matched {
        node.updated_at = now;
    }
    (node, matched)
}

/// Append `child` to the children of the node identified by `parent_id`
///
/// Returns the new root, or `None` when `parent_id` does not occur in this
/// aggregate. The inserted child keeps its own timestamps; the parent and its
/// ancestors get `updated_at = now`.
///
/// # Examples
///
/// ```rust
/// use catalog_core::models::CategoryNode;
/// use catalog_core::tree::insert_child;
/// use chrono::Utc;
///
/// let root = CategoryNode::new("Clothing".to_string(), "clothing".to_string(), None);
/// let root_id = root.id.clone();
/// let child = CategoryNode::new("Hoodies".to_string(), "hoodies".to_string(), None);
///
/// let root = insert_child(root, &root_id, child, Utc::now()).unwrap();
/// assert_eq!(root.children.len(), 1);
/// ```
pub fn insert_child(
    root: CategoryNode,
    parent_id: &str,
    child: CategoryNode,
    now: DateTime<Utc>,
) -> Option<CategoryNode> {
    let mut child = Some(child);
    let (rebuilt, matched) = map_first_match(
        root,
        &|node| node.id == parent_id,
        &mut |mut parent| {
            if let Some(child) = child.take() {
                parent.children.push(child);
            }
            parent
        },
        now,
    );
    matched.then_some(rebuilt)
}

/// Replace the fields of the node identified by `node_id` via `update`
///
/// The update function receives the current node and returns its replacement;
/// a field-level patch preserves `children` unless it explicitly replaces
/// them. Returns `None` when `node_id` does not occur in this aggregate.
pub fn replace_node<F>(
    root: CategoryNode,
    node_id: &str,
    update: F,
    now: DateTime<Utc>,
) -> Option<CategoryNode>
where
    F: FnOnce(CategoryNode) -> CategoryNode,
{
    let mut update = Some(update);
    let (rebuilt, matched) = map_first_match(
        root,
        &|node| node.id == node_id,
        &mut |node| match update.take() {
            Some(update) => update(node),
            None => node,
        },
        now,
    );
    matched.then_some(rebuilt)
}

/// Remove the node identified by `node_id`, along with its entire subtree
///
/// The match is on the *parent* (the node whose children contain the target),
/// so the removed node and all of its descendants vanish in one edit; no
/// orphans can remain. Returns `None` when `node_id` is not below this root.
/// Removing the root itself is not a tree edit (the whole document is deleted
/// instead), so `node_id == root.id` also returns `None`.
pub fn remove_node(
    root: CategoryNode,
    node_id: &str,
    now: DateTime<Utc>,
) -> Option<CategoryNode> {
    if root.id == node_id {
        return None;
    }
    let (rebuilt, matched) = map_first_match(
        root,
        &|node| node.children.iter().any(|child| child.id == node_id),
        &mut |mut parent| {
            parent.children.retain(|child| child.id != node_id);
            parent
        },
        now,
    );
    matched.then_some(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::locate::{descendant_count, find_in_subtree};
    use chrono::Duration;

    /// clothing > outerwear > hoodies, all with known ids
    fn sample_root() -> CategoryNode {
        let hoodies = CategoryNode::new_with_id(
            "n-hood".into(),
            "Hoodies".into(),
            "hoodies".into(),
            None,
        );
        let mut outerwear = CategoryNode::new_with_id(
            "n-outer".into(),
            "Outerwear".into(),
            "outerwear".into(),
            None,
        );
        outerwear.children.push(hoodies);
        let mut clothing = CategoryNode::new_with_id(
            "n-cloth".into(),
            "Clothing".into(),
            "clothing".into(),
            None,
        );
        clothing.children.push(outerwear);
        clothing
    }

    fn later_than(root: &CategoryNode) -> DateTime<Utc> {
        root.updated_at + Duration::minutes(5)
    }

    #[test]
    fn test_insert_child_at_depth() {
        let root = sample_root();
        let now = later_than(&root);
        let zips = CategoryNode::new_with_id("n-zip".into(), "Zip Ups".into(), "zip-ups".into(), None);

        let root = insert_child(root, "n-hood", zips, now).unwrap();

        let hoodies = find_in_subtree(&root, "n-hood").unwrap();
        assert_eq!(hoodies.children.len(), 1);
        assert_eq!(hoodies.children[0].id, "n-zip");
    }

    #[test]
    fn test_insert_refreshes_spine_timestamps_only() {
        let mut root = sample_root();
        // A sibling branch outside the spine must keep its timestamp
        let tees = CategoryNode::new_with_id("n-tees".into(), "Tees".into(), "tees".into(), None);
        let tees_before = tees.updated_at;
        root.children.push(tees);
        let now = later_than(&root);

        let child = CategoryNode::new_with_id("n-zip".into(), "Zip Ups".into(), "zip-ups".into(), None);
        let root = insert_child(root, "n-hood", child, now).unwrap();

        assert_eq!(root.updated_at, now);
        assert_eq!(find_in_subtree(&root, "n-outer").unwrap().updated_at, now);
        assert_eq!(find_in_subtree(&root, "n-hood").unwrap().updated_at, now);
        // Off-spine sibling untouched
        assert_eq!(
            find_in_subtree(&root, "n-tees").unwrap().updated_at,
            tees_before
        );
        // The inserted child keeps its own creation timestamps
        assert_ne!(find_in_subtree(&root, "n-zip").unwrap().updated_at, now);
    }

    #[test]
    fn test_insert_into_unknown_parent_returns_none() {
        let root = sample_root();
        let now = later_than(&root);
        let child = CategoryNode::new("X".into(), "x".into(), None);
        assert!(insert_child(root, "n-missing", child, now).is_none());
    }

    #[test]
    fn test_replace_patches_fields_and_preserves_children() {
        let root = sample_root();
        let now = later_than(&root);

        let root = replace_node(
            root,
            "n-outer",
            |mut node| {
                node.name = "Outer Wear".into();
                node.slug = "outer-wear".into();
                node
            },
            now,
        )
        .unwrap();

        let outer = find_in_subtree(&root, "n-outer").unwrap();
        assert_eq!(outer.name, "Outer Wear");
        assert_eq!(outer.slug, "outer-wear");
        assert_eq!(outer.updated_at, now);
        // Subtree below the replaced node is intact
        assert!(find_in_subtree(&root, "n-hood").is_some());
    }

    #[test]
    fn test_replace_unknown_node_returns_none() {
        let root = sample_root();
        let now = later_than(&root);
        assert!(replace_node(root, "n-missing", |node| node, now).is_none());
    }

    #[test]
    fn test_remove_deletes_whole_subtree() {
        let root = sample_root();
        let now = later_than(&root);

        let root = remove_node(root, "n-outer", now).unwrap();

        assert!(root.children.is_empty());
        assert!(find_in_subtree(&root, "n-outer").is_none());
        // The grandchild went with its parent; no orphans remain
        assert!(find_in_subtree(&root, "n-hood").is_none());
        assert_eq!(descendant_count(&root), 0);
        assert_eq!(root.updated_at, now);
    }

    #[test]
    fn test_remove_leaf_keeps_siblings() {
        let mut root = sample_root();
        root.children.push(CategoryNode::new_with_id(
            "n-tees".into(),
            "Tees".into(),
            "tees".into(),
            None,
        ));
        let now = later_than(&root);

        let root = remove_node(root, "n-hood", now).unwrap();

        assert!(find_in_subtree(&root, "n-hood").is_none());
        assert!(find_in_subtree(&root, "n-outer").unwrap().children.is_empty());
        assert!(find_in_subtree(&root, "n-tees").is_some());
    }

    #[test]
    fn test_remove_root_itself_is_not_a_tree_edit() {
        let root = sample_root();
        let now = later_than(&root);
        assert!(remove_node(root, "n-cloth", now).is_none());
    }

    #[test]
    fn test_mutations_do_not_alias_the_original() {
        let original = sample_root();
        let now = later_than(&original);

        let mutated = insert_child(
            original.clone(),
            "n-hood",
            CategoryNode::new("Zips".into(), "zips".into(), None),
            now,
        )
        .unwrap();

        // The original value is untouched by the edit
        assert!(find_in_subtree(&original, "n-hood").unwrap().children.is_empty());
        assert_eq!(
            find_in_subtree(&mutated, "n-hood").unwrap().children.len(),
            1
        );
    }
}
