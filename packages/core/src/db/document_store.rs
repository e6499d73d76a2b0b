//! DocumentStore Trait - Persistence Adapter Boundary
//!
//! This module defines the `DocumentStore` trait that abstracts the document
//! database underneath the category engine. The engine needs exactly five
//! operations: get-by-id, ordered list with cursor pagination, create,
//! whole-document replace, and delete. Any store capable of those (an
//! embedded store, a hosted document database) can sit behind this trait
//! without changes to the service layer.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: All methods are async to support both embedded and
//!    network backends
//! 2. **Whole Documents Only**: A root aggregate with its embedded subtree is
//!    one `serde_json::Value`; there are no partial or nested writes, which is
//!    what makes every mutation atomic per aggregate
//! 3. **Optimistic Concurrency**: `replace_document` takes an expected
//!    version; two writers racing on the same root surface a
//!    `VersionConflict` instead of silently overwriting each other
//!
//! # Examples
//!
//! ```rust
//! use catalog_core::db::{DocumentStore, ListQuery, MemoryStore};
//! use serde_json::json;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new();
//!
//!     let id = store
//!         .create_document("categories", json!({"id": "c-1", "name": "Clothing"}))
//!         .await?;
//!     assert_eq!(id, "c-1");
//!
//!     let doc = store.get_document("categories", "c-1").await?;
//!     assert!(doc.is_some());
//!     Ok(())
//! }
//! ```

use crate::db::error::DocumentStoreError;
use async_trait::async_trait;
use serde_json::Value;

/// Sort direction for document listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Smallest first
    Ascending,
    /// Largest first (the default: newest-first listings)
    #[default]
    Descending,
}

/// Parameters for an ordered, cursor-paginated listing
///
/// # Examples
///
/// ```rust
/// use catalog_core::db::{ListQuery, OrderDirection};
///
/// let query = ListQuery::ordered_by("createdAt", OrderDirection::Descending).with_limit(20);
/// assert_eq!(query.limit, Some(20));
/// ```
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Top-level document field to order by (e.g. `"name"`, `"createdAt"`)
    pub order_by: String,

    /// Sort direction
    pub direction: OrderDirection,

    /// Max documents per page; `None` returns everything in one page
    pub limit: Option<usize>,

    /// Opaque cursor from a previous page's `next_cursor`
    pub cursor: Option<String>,
}

impl ListQuery {
    /// Listing ordered by the given field and direction, unbounded, first page
    pub fn ordered_by(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            order_by: field.into(),
            direction,
            limit: None,
            cursor: None,
        }
    }

    /// Cap the page size
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resume after a previous page
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::ordered_by("createdAt", OrderDirection::Descending)
    }
}

/// One page of an ordered listing
#[derive(Debug, Clone)]
pub struct DocumentPage {
    /// Documents in requested order
    pub documents: Vec<Value>,

    /// Cursor for the next page; `None` when this page is the last
    pub next_cursor: Option<String>,
}

/// Abstraction over the document database underneath the engine
///
/// Implementations must be `Send + Sync` so the service can hold the store
/// behind `Arc<dyn DocumentStore>` across await points.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Get a whole document by id
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` when the document exists
    /// - `Ok(None)` when it does not (absence is not an error)
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, DocumentStoreError>;

    /// List documents ordered by a top-level field, one page at a time
    ///
    /// Documents missing the order field sort as nulls. The returned cursor
    /// is opaque; pass it back unchanged to fetch the next page.
    async fn list_documents(
        &self,
        collection: &str,
        query: ListQuery,
    ) -> Result<DocumentPage, DocumentStoreError>;

    /// Create a new document, returning its id
    ///
    /// When `data` carries a top-level string `"id"` field, that id keys the
    /// document (the engine keys root aggregates by their root node id);
    /// otherwise the store generates one.
    ///
    /// # Errors
    ///
    /// `DocumentExists` when the id is already taken.
    async fn create_document(
        &self,
        collection: &str,
        data: Value,
    ) -> Result<String, DocumentStoreError>;

    /// Overwrite a whole existing document
    ///
    /// This is the only write path for mutations to an existing root
    /// aggregate. With `expected_version` set, the stored document's
    /// top-level `"version"` field must match or the replace fails with
    /// `VersionConflict` and leaves the document untouched.
    ///
    /// # Errors
    ///
    /// `DocumentMissing` when the id does not exist; `VersionConflict` on a
    /// failed version check.
    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        data: Value,
        expected_version: Option<i64>,
    ) -> Result<(), DocumentStoreError>;

    /// Delete a whole document
    ///
    /// Deleting an absent document succeeds (idempotent delete).
    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError>;
}
