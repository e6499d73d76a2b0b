//! Document Store Error Types
//!
//! This module defines error types for the persistence adapter boundary,
//! covering create/replace/delete failures and optimistic concurrency
//! conflicts.

use thiserror::Error;

/// Document store operation errors
///
/// Covers the failure modes of the adapter interface itself. Real adapters
/// (a hosted document database, a network store) funnel their own failures
/// through the `Backend` variant; the engine propagates all of these
/// unmodified to callers.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Create targeted an id that already exists in the collection
    #[error("Document already exists: {collection}/{id}")]
    DocumentExists { collection: String, id: String },

    /// Replace targeted an id that is not present
    #[error("Document not found: {collection}/{id}")]
    DocumentMissing { collection: String, id: String },

    /// Optimistic concurrency check failed on replace
    #[error("Version conflict for {collection}/{id}: expected version {expected}, found {actual}")]
    VersionConflict {
        collection: String,
        id: String,
        expected: i64,
        actual: i64,
    },

    /// Pagination cursor does not resolve to a known position
    #[error("Invalid pagination cursor: {cursor}")]
    InvalidCursor { cursor: String },

    /// Document (de)serialization failed
    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying store backend failed
    #[error("Store backend failed: {0}")]
    Backend(#[from] anyhow::Error),
}

impl DocumentStoreError {
    /// Create a document-exists error
    pub fn document_exists(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DocumentExists {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Create a document-missing error
    pub fn document_missing(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DocumentMissing {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Create a version conflict error
    pub fn version_conflict(
        collection: impl Into<String>,
        id: impl Into<String>,
        expected: i64,
        actual: i64,
    ) -> Self {
        Self::VersionConflict {
            collection: collection.into(),
            id: id.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid cursor error
    pub fn invalid_cursor(cursor: impl Into<String>) -> Self {
        Self::InvalidCursor {
            cursor: cursor.into(),
        }
    }
}
