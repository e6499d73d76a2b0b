//! Category Service - Orchestration of the Category Tree Engine
//!
//! This module provides the externally consumed API for catalog categories:
//!
//! - CRUD operations (list, get, create, update, delete)
//! - Root resolution for nested mutations (every write below a root is a
//!   full-root read-modify-write against one document)
//! - Sibling-level slug uniqueness enforcement before any write
//! - Breadcrumb / routing helpers over the cached forest
//!
//! # Orchestration
//!
//! Every mutation follows the same order: locate the owning root in the
//! cached forest, validate (uniqueness, input), apply the pure tree mutation,
//! persist the single affected document, and only then update the cache and
//! emit a domain event. A validation failure therefore guarantees zero side
//! effects, and a store failure leaves the cache exactly as it was.
//!
//! # Concurrency
//!
//! Callers mutating different roots proceed independently. Two callers
//! racing on the *same* root are detected by the optimistic version check on
//! replace: the second write fails with a version conflict instead of
//! silently overwriting the first. The losing caller re-lists and retries.
//!
//! # Examples
//!
//! ```rust
//! use catalog_core::db::MemoryStore;
//! use catalog_core::services::{CategoryService, CreateCategoryParams};
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = CategoryService::new(Arc::new(MemoryStore::new()));
//!
//!     let root_id = service
//!         .create_category(CreateCategoryParams::named("Clothing"))
//!         .await?;
//!
//!     let child_id = service
//!         .create_category(CreateCategoryParams::named("Hoodies").under(&root_id))
//!         .await?;
//!
//!     assert_eq!(
//!         service.display_path(&child_id).await.as_deref(),
//!         Some("Clothing > Hoodies")
//!     );
//!     Ok(())
//! }
//! ```

use crate::db::{DocumentStore, DocumentStoreError, ListQuery, OrderDirection};
use crate::models::time::{SystemTimeProvider, TimeProvider};
use crate::models::{CategoryNode, CategoryPatch, ValidationError};
use crate::services::error::CategoryServiceError;
use crate::services::events::CategoryEvent;
use crate::tree;
use crate::utils::{slug_path_to_display_path, slugify};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Broadcast channel capacity for category events.
///
/// 128 gives headroom for bursts (catalog imports) while bounding memory;
/// subscribers only track current state, so lag is acceptable.
const CATEGORY_EVENT_CHANNEL_CAPACITY: usize = 128;

/// Default collection name for root aggregate documents
const DEFAULT_COLLECTION: &str = "categories";

/// Sibling-level label used in conflict errors for top-level categories
const TOP_LEVEL: &str = "the top level";

/// Parameters for creating a category
///
/// # Slug Derivation
///
/// When `slug` is absent it is derived from `name` (lowercased, whitespace
/// runs collapsed to hyphens). A name that derives to something other than a
/// well-formed slug is rejected at validation; it is never silently repaired,
/// so the caller can prompt for an explicit slug instead.
///
/// # Examples
///
/// ```rust
/// use catalog_core::services::CreateCategoryParams;
///
/// let params = CreateCategoryParams::named("Hood Wears").under("parent-id");
/// assert_eq!(params.name, "Hood Wears");
/// assert!(params.slug.is_none()); // derived: "hood-wears"
/// ```
#[derive(Debug, Clone)]
pub struct CreateCategoryParams {
    /// Optional pre-generated id (e.g. an optimistic UI tracking the node
    /// before the create round trip completes); auto-generated when `None`
    pub id: Option<String>,
    /// Human-readable label
    pub name: String,
    /// Explicit slug; derived from `name` when `None`
    pub slug: Option<String>,
    /// Optional free-text description
    pub description: Option<String>,
    /// Parent category id; `None` creates a new root aggregate
    pub parent_id: Option<String>,
}

impl CreateCategoryParams {
    /// Params for a new root category with a derived slug
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: None,
            description: None,
            parent_id: None,
        }
    }

    /// Place the new category under the given parent
    pub fn under(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Use an explicit slug instead of deriving one from the name
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Root document field to order listings by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryOrderField {
    /// Order by `name`
    Name,
    /// Order by `createdAt` (the default: newest roots first with
    /// [`OrderDirection::Descending`])
    #[default]
    CreatedAt,
    /// Order by `updatedAt`
    UpdatedAt,
}

impl CategoryOrderField {
    /// The document field name this variant orders by
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryOrderField::Name => "name",
            CategoryOrderField::CreatedAt => "createdAt",
            CategoryOrderField::UpdatedAt => "updatedAt",
        }
    }
}

/// Options for [`CategoryService::list_categories`]
#[derive(Debug, Clone, Default)]
pub struct ListCategoriesOptions {
    /// Field to order roots by
    pub order_by: CategoryOrderField,
    /// Sort direction
    pub direction: OrderDirection,
    /// Max roots per page; `None` loads everything
    pub limit: Option<usize>,
    /// Cursor from a previous page
    pub cursor: Option<String>,
}

/// One page of root categories, subtrees embedded
#[derive(Debug, Clone)]
pub struct CategoryPage {
    /// Root aggregates in requested order
    pub categories: Vec<CategoryNode>,
    /// Cursor for the next page; `None` when this page is the last
    pub next_cursor: Option<String>,
}

/// Core service for category CRUD and tree orchestration
///
/// Owns the in-memory forest (the ordered list of root aggregates) as a read
/// cache behind its API; separate service instances never share state, so
/// independent engines (e.g. in tests) cannot interfere.
pub struct CategoryService {
    /// Document store holding one document per root aggregate
    store: Arc<dyn DocumentStore>,

    /// Collection the root documents live in
    collection: String,

    /// Cached forest, populated by `list_categories`
    forest: RwLock<Vec<CategoryNode>>,

    /// Clock used for `created_at` / `updated_at` stamps
    clock: Arc<dyn TimeProvider>,

    /// Broadcast channel for category events
    event_tx: broadcast::Sender<CategoryEvent>,
}

impl CategoryService {
    /// Create a new CategoryService over the given store
    ///
    /// Uses the system clock and the default `"categories"` collection; see
    /// [`with_collection`](Self::with_collection) and
    /// [`with_clock`](Self::with_clock) to override.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let (event_tx, _) = broadcast::channel(CATEGORY_EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            collection: DEFAULT_COLLECTION.to_string(),
            forest: RwLock::new(Vec::new()),
            clock: Arc::new(SystemTimeProvider),
            event_tx,
        }
    }

    /// Use a different collection name for root documents
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Use a different clock (deterministic timestamps in tests)
    pub fn with_clock(mut self, clock: Arc<dyn TimeProvider>) -> Self {
        self.clock = clock;
        self
    }

    /// Subscribe to category events
    ///
    /// Events are emitted only after a persistence write succeeds; rejected
    /// or failed operations never produce one.
    pub fn subscribe_to_events(&self) -> broadcast::Receiver<CategoryEvent> {
        self.event_tx.subscribe()
    }

    /// Emit an event to all subscribers; no subscribers is not an error
    fn emit_event(&self, event: CategoryEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Load a page of root categories and refresh the forest cache
    ///
    /// The first page (no cursor) replaces the cache; subsequent pages extend
    /// it. Each returned root carries its entire embedded subtree.
    ///
    /// # Errors
    ///
    /// Store failures and malformed documents surface as
    /// [`CategoryServiceError::Persistence`]; the cache keeps its previous
    /// contents on any failure.
    pub async fn list_categories(
        &self,
        options: ListCategoriesOptions,
    ) -> Result<CategoryPage, CategoryServiceError> {
        let first_page = options.cursor.is_none();
        let mut query = ListQuery::ordered_by(options.order_by.as_str(), options.direction);
        if let Some(limit) = options.limit {
            query = query.with_limit(limit);
        }
        if let Some(cursor) = options.cursor {
            query = query.with_cursor(cursor);
        }

        let page = self.store.list_documents(&self.collection, query).await?;
        let mut roots = Vec::with_capacity(page.documents.len());
        for document in page.documents {
            let root: CategoryNode =
                serde_json::from_value(document).map_err(DocumentStoreError::from)?;
            roots.push(root);
        }

        let mut forest = self.forest.write().await;
        if first_page {
            *forest = roots.clone();
        } else {
            for root in &roots {
                if !forest.iter().any(|cached| cached.id == root.id) {
                    forest.push(root.clone());
                }
            }
        }
        tracing::debug!(
            "Loaded {} root categories into the forest cache ({} total)",
            roots.len(),
            forest.len()
        );

        Ok(CategoryPage {
            categories: roots,
            next_cursor: page.next_cursor,
        })
    }

    /// Get a category (any depth) from the cached forest
    ///
    /// Pure cache lookup: there is no lazy single-node fetch. Callers are
    /// expected to have listed first; a `None` on an id that should exist
    /// means the cache is stale and the caller should re-list.
    pub async fn get_category(&self, id: &str) -> Option<CategoryNode> {
        let forest = self.forest.read().await;
        tree::find_node(&forest, id).cloned()
    }

    /// Create a category, either as a new root or under a parent
    ///
    /// Root path: slug checked against all existing root slugs (the root
    /// level is itself a sibling level), a brand-new document is created, and
    /// the new root is prepended to the cached forest.
    ///
    /// Nested path: the owning root of `parent_id` is located, the slug is
    /// checked against the parent's direct children only, and the whole
    /// owning root document is replaced.
    ///
    /// # Errors
    ///
    /// - [`CategoryServiceError::NotFound`] when `parent_id` resolves to no
    ///   node in the forest
    /// - [`CategoryServiceError::SlugConflict`] on a collision at the
    ///   resolved sibling level
    /// - [`CategoryServiceError::ValidationFailed`] for a blank name or
    ///   malformed slug
    ///
    /// All of the above are raised before any store call.
    pub async fn create_category(
        &self,
        params: CreateCategoryParams,
    ) -> Result<String, CategoryServiceError> {
        let now = self.clock.now();
        let slug = params.slug.unwrap_or_else(|| slugify(&params.name));
        let mut node = match params.id {
            Some(id) => CategoryNode::new_with_id(id, params.name, slug, params.description),
            None => CategoryNode::new(params.name, slug, params.description),
        };
        node.created_at = now;
        node.updated_at = now;
        node.validate()?;

        match params.parent_id {
            None => self.create_root(node).await,
            Some(parent_id) => self.create_nested(node, &parent_id).await,
        }
    }

    /// Create a brand-new root aggregate document
    async fn create_root(&self, node: CategoryNode) -> Result<String, CategoryServiceError> {
        {
            let forest = self.forest.read().await;
            if tree::slug_exists_among_siblings(&forest, &node.slug, None) {
                return Err(CategoryServiceError::slug_conflict(
                    node.slug.clone(),
                    TOP_LEVEL,
                ));
            }
        }

        let document = serde_json::to_value(&node).map_err(DocumentStoreError::from)?;
        let id = self.store.create_document(&self.collection, document).await?;

        let mut forest = self.forest.write().await;
        forest.insert(0, node);
        drop(forest);

        tracing::info!("Created root category {}", id);
        self.emit_event(CategoryEvent::CategoryCreated {
            id: id.clone(),
            root_id: id.clone(),
        });
        Ok(id)
    }

    /// Insert a node under a parent and replace the owning root document
    async fn create_nested(
        &self,
        node: CategoryNode,
        parent_id: &str,
    ) -> Result<String, CategoryServiceError> {
        let now = node.created_at;
        let (owning_root, expected_version) = {
            let forest = self.forest.read().await;
            let parent = tree::find_node(&forest, parent_id)
                .ok_or_else(|| CategoryServiceError::not_found(parent_id))?;
            if tree::slug_exists_among_siblings(&parent.children, &node.slug, None) {
                return Err(CategoryServiceError::slug_conflict(
                    node.slug.clone(),
                    format!("'{}'", parent.name),
                ));
            }
            let root = tree::find_owning_root(&forest, parent_id)
                .ok_or_else(|| CategoryServiceError::not_found(parent_id))?;
            (root.clone(), root.version)
        };

        let node_id = node.id.clone();
        let mut new_root = tree::insert_child(owning_root, parent_id, node, now)
            .ok_or_else(|| CategoryServiceError::not_found(parent_id))?;
        new_root.version = expected_version + 1;

        self.replace_root(&new_root, expected_version).await?;
        let root_id = new_root.id.clone();
        self.swap_cached_root(new_root).await;

        tracing::info!(
            "Created category {} under parent {} (root {})",
            node_id,
            parent_id,
            root_id
        );
        self.emit_event(CategoryEvent::CategoryCreated {
            id: node_id.clone(),
            root_id,
        });
        Ok(node_id)
    }

    /// Update a category's fields
    ///
    /// When the patch carries an explicit `slug`, or a `name` the slug is
    /// re-derived from, the result is checked against all siblings except the
    /// node itself. The subtree below the node is never touched by a patch.
    /// An empty patch is a no-op.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`create_category`](Self::create_category); a
    /// version conflict on the underlying replace surfaces as
    /// [`CategoryServiceError::Persistence`].
    pub async fn update_category(
        &self,
        id: &str,
        patch: CategoryPatch,
    ) -> Result<(), CategoryServiceError> {
        if patch.is_empty() {
            tracing::debug!("Empty patch for category {}, nothing to do", id);
            return Ok(());
        }
        let now = self.clock.now();

        // Explicit slug wins; otherwise a name change re-derives the slug
        let effective_slug = match (&patch.slug, &patch.name) {
            (Some(slug), _) => Some(slug.clone()),
            (None, Some(name)) => Some(slugify(name)),
            (None, None) => None,
        };

        let (owning_root, expected_version) = {
            let forest = self.forest.read().await;
            let root = tree::find_owning_root(&forest, id)
                .ok_or_else(|| CategoryServiceError::not_found(id))?;

            if let Some(name) = &patch.name {
                if name.trim().is_empty() {
                    return Err(ValidationError::EmptyName.into());
                }
            }
            if let Some(slug) = &effective_slug {
                if !crate::models::is_valid_slug(slug) {
                    return Err(ValidationError::InvalidSlug(slug.clone()).into());
                }
                // Sibling level: all roots for a root node, otherwise the
                // parent's direct children
                if root.id == id {
                    if tree::slug_exists_among_siblings(&forest, slug, Some(id)) {
                        return Err(CategoryServiceError::slug_conflict(slug.clone(), TOP_LEVEL));
                    }
                } else if let Some(parent) = tree::find_parent(root, id) {
                    if tree::slug_exists_among_siblings(&parent.children, slug, Some(id)) {
                        return Err(CategoryServiceError::slug_conflict(
                            slug.clone(),
                            format!("'{}'", parent.name),
                        ));
                    }
                }
            }
            (root.clone(), root.version)
        };

        let applied = CategoryPatch {
            name: patch.name,
            slug: effective_slug,
            description: patch.description,
        };
        let mut new_root = tree::replace_node(owning_root, id, |node| applied.apply(node), now)
            .ok_or_else(|| CategoryServiceError::not_found(id))?;
        new_root.version = expected_version + 1;

        self.replace_root(&new_root, expected_version).await?;
        let root_id = new_root.id.clone();
        self.swap_cached_root(new_root).await;

        tracing::info!("Updated category {} (root {})", id, root_id);
        self.emit_event(CategoryEvent::CategoryUpdated {
            id: id.to_string(),
            root_id,
        });
        Ok(())
    }

    /// Delete a category and its entire subtree
    ///
    /// A root category deletes its whole document; a nested one is removed
    /// from the owning root, which is then replaced. Either way no descendant
    /// survives. Callers wanting to warn first can use
    /// [`descendant_count`](Self::descendant_count).
    pub async fn delete_category(&self, id: &str) -> Result<(), CategoryServiceError> {
        let now = self.clock.now();
        let nested = {
            let forest = self.forest.read().await;
            let root = tree::find_owning_root(&forest, id)
                .ok_or_else(|| CategoryServiceError::not_found(id))?;
            if root.id == id {
                None
            } else {
                Some((root.clone(), root.version))
            }
        };

        let root_id = match nested {
            None => {
                self.store.delete_document(&self.collection, id).await?;
                let mut forest = self.forest.write().await;
                forest.retain(|root| root.id != id);
                id.to_string()
            }
            Some((owning_root, expected_version)) => {
                let mut new_root = tree::remove_node(owning_root, id, now)
                    .ok_or_else(|| CategoryServiceError::not_found(id))?;
                new_root.version = expected_version + 1;
                self.replace_root(&new_root, expected_version).await?;
                let root_id = new_root.id.clone();
                self.swap_cached_root(new_root).await;
                root_id
            }
        };

        tracing::info!("Deleted category {} and its subtree (root {})", id, root_id);
        self.emit_event(CategoryEvent::CategoryDeleted {
            id: id.to_string(),
            root_id,
        });
        Ok(())
    }

    /// Slug path of a cached category (e.g. `clothing/hood-wears/hoodies`)
    pub async fn slug_path(&self, id: &str) -> Option<String> {
        let forest = self.forest.read().await;
        tree::slug_path_of(&forest, id)
    }

    /// Display path of a cached category (e.g. `Clothing > Hood Wears > Hoodies`)
    pub async fn display_path(&self, id: &str) -> Option<String> {
        self.slug_path(id)
            .await
            .map(|path| slug_path_to_display_path(&path))
    }

    /// Resolve a slug path to a cached category (routing lookups)
    pub async fn find_by_slug_path(&self, path: &str) -> Option<CategoryNode> {
        let forest = self.forest.read().await;
        tree::find_by_slug_path(&forest, path).cloned()
    }

    /// Number of descendants a delete of this category would remove
    pub async fn descendant_count(&self, id: &str) -> Option<usize> {
        let forest = self.forest.read().await;
        tree::find_node(&forest, id).map(tree::descendant_count)
    }

    /// Serialize a root and replace its document, version-checked
    async fn replace_root(
        &self,
        root: &CategoryNode,
        expected_version: i64,
    ) -> Result<(), CategoryServiceError> {
        let document = serde_json::to_value(root).map_err(DocumentStoreError::from)?;
        self.store
            .replace_document(&self.collection, &root.id, document, Some(expected_version))
            .await?;
        Ok(())
    }

    /// Swap the cached entry for a root after a successful write
    async fn swap_cached_root(&self, new_root: CategoryNode) {
        let mut forest = self.forest.write().await;
        if let Some(slot) = forest.iter_mut().find(|root| root.id == new_root.id) {
            *slot = new_root;
        }
    }
}
