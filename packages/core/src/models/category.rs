//! Category Data Structures
//!
//! This module defines the recursive `CategoryNode` struct used throughout the
//! catalog engine.
//!
//! # Architecture
//!
//! - **Recursive Aggregate**: A node owns its `children` vector; a whole subtree
//!   is one value
//! - **Root Aggregate**: A top-level node is persisted as a single document with
//!   its entire subtree embedded inline (no per-descendant records)
//! - **Sibling-Scoped Slugs**: A `slug` is unique only among the direct children
//!   of one parent (root slugs are unique among all roots), never globally
//!
//! # Examples
//!
//! ```rust
//! use catalog_core::models::CategoryNode;
//!
//! let root = CategoryNode::new(
//!     "Clothing".to_string(),
//!     "clothing".to_string(),
//!     Some("Apparel and accessories".to_string()),
//! );
//!
//! assert!(root.children.is_empty());
//! assert_eq!(root.version, 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default version value for serde deserialization (version 1)
///
/// Documents written before optimistic concurrency was introduced carry no
/// `version` field; they deserialize as version 1.
fn default_version() -> i64 {
    1
}

/// Validation errors for category input
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Name is empty or whitespace-only
    #[error("Category name must not be empty")]
    EmptyName,

    /// Slug contains characters outside lowercase alphanumerics and hyphens,
    /// or has empty hyphen-separated words
    #[error("Invalid slug '{0}': expected lowercase alphanumeric words joined by single hyphens")]
    InvalidSlug(String),
}

/// A category or sub-category in the catalog tree.
///
/// # Fields
///
/// - `id`: Unique identifier (UUID), unique across the whole forest
/// - `name`: Human-readable label shown in pickers and breadcrumbs
/// - `slug`: URL-safe identifier, unique among siblings of the same parent only
/// - `description`: Optional free text
/// - `children`: Ordered sub-categories (insertion order, preserved for display)
/// - `version`: Optimistic concurrency token; meaningful on root aggregates,
///   incremented on every whole-document replace
/// - `created_at` / `updated_at`: `updated_at` is refreshed on every structural
///   change to the node *or any of its descendants*, up through the owning root
///
/// # Storage Model
///
/// Only root nodes are persisted, each as one whole document with the entire
/// subtree embedded. Every mutation below a root is a full-root
/// read-modify-write; there is never a partial or nested write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    /// Unique identifier (UUID), globally unique across the forest
    pub id: String,

    /// Human-readable label
    pub name: String,

    /// URL-safe identifier, unique within its sibling level only
    pub slug: String,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered sub-categories; empty for leaves
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,

    /// Optimistic concurrency control version (incremented on each replace)
    #[serde(default = "default_version")]
    pub version: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp (bumped up the ancestor spine)
    pub updated_at: DateTime<Utc>,
}

impl CategoryNode {
    /// Create a new leaf category with an auto-generated UUID
    ///
    /// # Arguments
    ///
    /// * `name` - Human-readable label
    /// * `slug` - URL-safe identifier (see [`is_valid_slug`])
    /// * `description` - Optional free text
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use catalog_core::models::CategoryNode;
    /// let node = CategoryNode::new("Hoodies".to_string(), "hoodies".to_string(), None);
    /// assert_eq!(node.slug, "hoodies");
    /// assert!(node.is_leaf());
    /// ```
    pub fn new(name: String, slug: String, description: Option<String>) -> Self {
        Self::new_with_id(Uuid::new_v4().to_string(), name, slug, description)
    }

    /// Create a new leaf category with an explicit id
    ///
    /// Used when the caller pre-generates ids (e.g. an optimistic UI that
    /// tracks nodes before the create round trip completes).
    pub fn new_with_id(id: String, name: String, slug: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            slug,
            description,
            children: Vec::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this node has no sub-categories
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Validate name and slug
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the name is blank or the slug is not a
    /// well-formed lowercase hyphenated identifier.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !is_valid_slug(&self.slug) {
            return Err(ValidationError::InvalidSlug(self.slug.clone()));
        }
        Ok(())
    }
}

/// Check whether a slug is well-formed
///
/// A well-formed slug is one or more non-empty words of lowercase ASCII
/// alphanumerics joined by single hyphens (`hood-wears`, `co-op`, `tees`).
///
/// # Examples
///
/// ```rust
/// # use catalog_core::models::is_valid_slug;
/// assert!(is_valid_slug("hood-wears"));
/// assert!(is_valid_slug("tees2"));
/// assert!(!is_valid_slug(""));
/// assert!(!is_valid_slug("Hood-Wears"));
/// assert!(!is_valid_slug("hood--wears"));
/// assert!(!is_valid_slug("hood wears"));
/// ```
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|word| {
            !word.is_empty()
                && word
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Sparse field-level patch for a category
///
/// `None` fields are left unchanged. A patch never touches `children`; the
/// subtree below a patched node is always preserved.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    /// New name, if changing
    pub name: Option<String>,

    /// New slug, if changing explicitly (otherwise derived from `name` when
    /// `name` changes)
    pub slug: Option<String>,

    /// New description, if changing
    pub description: Option<String>,
}

impl CategoryPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none() && self.description.is_none()
    }

    /// Apply this patch to a node, preserving untouched fields and children
    pub fn apply(&self, mut node: CategoryNode) -> CategoryNode {
        if let Some(name) = &self.name {
            node.name = name.clone();
        }
        if let Some(slug) = &self.slug {
            node.slug = slug.clone();
        }
        if let Some(description) = &self.description {
            node.description = Some(description.clone());
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_leaf_with_fresh_timestamps() {
        let node = CategoryNode::new(
            "Clothing".to_string(),
            "clothing".to_string(),
            Some("Apparel".to_string()),
        );

        assert!(node.is_leaf());
        assert_eq!(node.version, 1);
        assert_eq!(node.created_at, node.updated_at);
        assert_eq!(node.description.as_deref(), Some("Apparel"));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = CategoryNode::new("A".to_string(), "a".to_string(), None);
        let b = CategoryNode::new("A".to_string(), "a".to_string(), None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut node = CategoryNode::new("  ".to_string(), "blank".to_string(), None);
        assert!(matches!(node.validate(), Err(ValidationError::EmptyName)));

        node.name = "Blank".to_string();
        assert!(node.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_slug() {
        let node = CategoryNode::new("Hood Wears".to_string(), "Hood Wears".to_string(), None);
        assert!(matches!(
            node.validate(),
            Err(ValidationError::InvalidSlug(_))
        ));
    }

    #[test]
    fn test_slug_well_formedness() {
        assert!(is_valid_slug("hoodies"));
        assert!(is_valid_slug("hood-wears"));
        assert!(is_valid_slug("size-2xl"));
        assert!(!is_valid_slug("-hoodies"));
        assert!(!is_valid_slug("hoodies-"));
        assert!(!is_valid_slug("hood_wears"));
        assert!(!is_valid_slug("hood/wears"));
    }

    #[test]
    fn test_serde_round_trip_uses_camel_case() {
        let node = CategoryNode::new("Clothing".to_string(), "clothing".to_string(), None);
        let json = serde_json::to_value(&node).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        // Empty children and missing description are omitted entirely
        assert!(json.get("children").is_none());
        assert!(json.get("description").is_none());

        let back: CategoryNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_version_defaults_for_legacy_documents() {
        // Documents written before versioning have no version field
        let json = serde_json::json!({
            "id": "legacy-1",
            "name": "Legacy",
            "slug": "legacy",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        let node: CategoryNode = serde_json::from_value(json).unwrap();
        assert_eq!(node.version, 1);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_patch_preserves_children_and_untouched_fields() {
        let mut parent = CategoryNode::new("Outerwear".to_string(), "outerwear".to_string(), None);
        parent
            .children
            .push(CategoryNode::new("Jackets".to_string(), "jackets".to_string(), None));

        let patch = CategoryPatch {
            name: Some("Outer Wear".to_string()),
            ..Default::default()
        };
        let patched = patch.apply(parent.clone());

        assert_eq!(patched.name, "Outer Wear");
        assert_eq!(patched.slug, "outerwear");
        assert_eq!(patched.children, parent.children);
    }
}
