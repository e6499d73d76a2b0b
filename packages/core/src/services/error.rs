//! Service Layer Error Types
//!
//! This module defines the error taxonomy exposed by `CategoryService`:
//!
//! - `SlugConflict` - recoverable; the caller prompts for a different name.
//!   Never silently auto-renamed.
//! - `NotFound` - recoverable; the cache may be stale, the caller re-lists
//!   and retries.
//! - `Persistence` - the store rejected or failed the read/write; surfaced
//!   unchanged, and the in-memory forest is guaranteed untouched.
//!
//! Validation errors are always raised *before* any persistence call, so a
//! validation failure guarantees zero side effects.

use crate::db::DocumentStoreError;
use crate::models::ValidationError;
use thiserror::Error;

/// Category service operation errors
#[derive(Error, Debug)]
pub enum CategoryServiceError {
    /// A referenced category id does not exist in the cached forest
    #[error("Category not found: {id}")]
    NotFound { id: String },

    /// A slug collides with a sibling at the same level
    ///
    /// `level` names where the collision happened (the parent category's
    /// name, or "top level" for roots), so callers can render an actionable
    /// message.
    #[error("A category with slug '{slug}' already exists at {level}")]
    SlugConflict { slug: String, level: String },

    /// Input validation failed for a category
    #[error("Category validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// The document store rejected or failed an operation
    #[error("Persistence operation failed: {0}")]
    Persistence(#[from] DocumentStoreError),
}

impl CategoryServiceError {
    /// Create a not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a slug conflict error
    pub fn slug_conflict(slug: impl Into<String>, level: impl Into<String>) -> Self {
        Self::SlugConflict {
            slug: slug.into(),
            level: level.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_slug_and_level() {
        let err = CategoryServiceError::slug_conflict("hoodies", "'Outerwear'");
        assert_eq!(
            err.to_string(),
            "A category with slug 'hoodies' already exists at 'Outerwear'"
        );
    }

    #[test]
    fn test_store_errors_wrap_unchanged() {
        let cause = DocumentStoreError::document_missing("categories", "c-1");
        let err = CategoryServiceError::from(cause);
        assert!(matches!(
            err,
            CategoryServiceError::Persistence(DocumentStoreError::DocumentMissing { .. })
        ));
    }
}
