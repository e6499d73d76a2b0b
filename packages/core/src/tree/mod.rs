//! Category Tree Engine
//!
//! Pure, in-memory tree algorithms over the forest of root aggregates:
//!
//! - `locate` - read-only lookups (find a node, its owning root, its path)
//! - `mutate` - non-destructive structural edits returning a new root
//! - `siblings` - slug uniqueness within one sibling level
//!
//! Nothing in this module performs I/O or raises persistence errors; the
//! `CategoryService` orchestrates these against the document store.

pub mod locate;
pub mod mutate;
pub mod siblings;

pub use locate::{
    descendant_count, find_by_slug_path, find_in_subtree, find_node, find_owning_root,
    find_parent, slug_path_of,
};
pub use mutate::{insert_child, remove_node, replace_node};
pub use siblings::slug_exists_among_siblings;
