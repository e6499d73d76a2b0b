//! In-Memory Document Store
//!
//! Reference implementation of [`DocumentStore`] backed by a process-local
//! map. This is the store every test runs against, and it implements the full
//! contract: ordered listing, cursor pagination, idempotent delete, and
//! version-checked replace.

use crate::db::document_store::{DocumentPage, DocumentStore, ListQuery, OrderDirection};
use crate::db::error::DocumentStoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local document store
///
/// Collections are created lazily on first write. Documents are held as raw
/// `serde_json::Value`s keyed by id, so listings and snapshots reflect exactly
/// the bytes a real adapter would persist.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the raw contents of one collection
    ///
    /// Test and diagnostic support: lets callers compare the stored documents
    /// byte-for-byte before and after an operation (e.g. to prove a failed
    /// validation left the store untouched).
    pub async fn snapshot(&self, collection: &str) -> BTreeMap<String, Value> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

/// Order two optional field values: nulls/missing first, then bools, numbers,
/// strings; RFC 3339 timestamps order correctly as strings
fn compare_order_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, DocumentStoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn list_documents(
        &self,
        collection: &str,
        query: ListQuery,
    ) -> Result<DocumentPage, DocumentStoreError> {
        let collections = self.collections.read().await;
        let mut sorted: Vec<(&String, &Value)> = collections
            .get(collection)
            .map(|docs| docs.iter().collect())
            .unwrap_or_default();

        // Stable sort over the order field; ties keep id order, which makes
        // cursor pagination deterministic
        sorted.sort_by(|(_, a), (_, b)| {
            let ordering = compare_order_values(a.get(&query.order_by), b.get(&query.order_by));
            match query.direction {
                OrderDirection::Ascending => ordering,
                OrderDirection::Descending => ordering.reverse(),
            }
        });

        let start = match &query.cursor {
            Some(cursor) => {
                sorted
                    .iter()
                    .position(|(id, _)| *id == cursor)
                    .ok_or_else(|| DocumentStoreError::invalid_cursor(cursor.clone()))?
                    + 1
            }
            None => 0,
        };
        let end = query
            .limit
            .map(|limit| (start + limit).min(sorted.len()))
            .unwrap_or(sorted.len());

        let documents: Vec<Value> = sorted[start..end]
            .iter()
            .map(|(_, doc)| (*doc).clone())
            .collect();
        let next_cursor = (end > start && end < sorted.len()).then(|| sorted[end - 1].0.clone());

        Ok(DocumentPage {
            documents,
            next_cursor,
        })
    }

    async fn create_document(
        &self,
        collection: &str,
        data: Value,
    ) -> Result<String, DocumentStoreError> {
        let id = match data.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(&id) {
            return Err(DocumentStoreError::document_exists(collection, id));
        }
        docs.insert(id.clone(), data);
        Ok(id)
    }

    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        data: Value,
        expected_version: Option<i64>,
    ) -> Result<(), DocumentStoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| DocumentStoreError::document_missing(collection, id))?;
        let stored = docs
            .get(id)
            .ok_or_else(|| DocumentStoreError::document_missing(collection, id))?;

        if let Some(expected) = expected_version {
            // Documents written before versioning count as version 1
            let actual = stored.get("version").and_then(Value::as_i64).unwrap_or(1);
            if actual != expected {
                return Err(DocumentStoreError::version_conflict(
                    collection, id, expected, actual,
                ));
            }
        }

        docs.insert(id.to_string(), data);
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let store = MemoryStore::new();

        let id = store
            .create_document("categories", json!({"id": "c-1", "name": "Clothing"}))
            .await
            .unwrap();
        assert_eq!(id, "c-1");

        let doc = store.get_document("categories", "c-1").await.unwrap();
        assert_eq!(doc.unwrap()["name"], "Clothing");
        assert!(store
            .get_document("categories", "c-2")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_create_generates_id_when_absent() {
        let store = MemoryStore::new();
        let id = store
            .create_document("categories", json!({"name": "Anonymous"}))
            .await
            .unwrap();
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let store = MemoryStore::new();
        store
            .create_document("categories", json!({"id": "c-1"}))
            .await
            .unwrap();

        let err = store
            .create_document("categories", json!({"id": "c-1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::DocumentExists { .. }));
    }

    #[tokio::test]
    async fn test_list_orders_by_field_in_both_directions() {
        let store = MemoryStore::new();
        for (id, name) in [("c-1", "Banana"), ("c-2", "Apple"), ("c-3", "Cherry")] {
            store
                .create_document("categories", json!({"id": id, "name": name}))
                .await
                .unwrap();
        }

        let ascending = store
            .list_documents(
                "categories",
                ListQuery::ordered_by("name", OrderDirection::Ascending),
            )
            .await
            .unwrap();
        let names: Vec<_> = ascending
            .documents
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Apple", "Banana", "Cherry"]);

        let descending = store
            .list_documents(
                "categories",
                ListQuery::ordered_by("name", OrderDirection::Descending),
            )
            .await
            .unwrap();
        assert_eq!(descending.documents[0]["name"], "Cherry");
    }

    #[tokio::test]
    async fn test_cursor_pagination_walks_all_pages() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .create_document("categories", json!({"id": format!("c-{i}"), "rank": i}))
                .await
                .unwrap();
        }

        let mut seen = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut query = ListQuery::ordered_by("rank", OrderDirection::Ascending).with_limit(2);
            if let Some(cursor) = cursor.take() {
                query = query.with_cursor(cursor);
            }
            let page = store.list_documents("categories", query).await.unwrap();
            seen.extend(
                page.documents
                    .iter()
                    .map(|d| d["rank"].as_i64().unwrap()),
            );
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        assert_eq!(seen, [0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_unknown_cursor_is_rejected() {
        let store = MemoryStore::new();
        store
            .create_document("categories", json!({"id": "c-1", "rank": 1}))
            .await
            .unwrap();

        let err = store
            .list_documents(
                "categories",
                ListQuery::ordered_by("rank", OrderDirection::Ascending)
                    .with_cursor("c-unknown"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::InvalidCursor { .. }));
    }

    #[tokio::test]
    async fn test_replace_checks_expected_version() {
        let store = MemoryStore::new();
        store
            .create_document("categories", json!({"id": "c-1", "version": 1}))
            .await
            .unwrap();

        // Matching version: accepted
        store
            .replace_document("categories", "c-1", json!({"id": "c-1", "version": 2}), Some(1))
            .await
            .unwrap();

        // Stale version: rejected, document untouched
        let err = store
            .replace_document("categories", "c-1", json!({"id": "c-1", "version": 2}), Some(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DocumentStoreError::VersionConflict {
                expected: 1,
                actual: 2,
                ..
            }
        ));
        let stored = store.get_document("categories", "c-1").await.unwrap().unwrap();
        assert_eq!(stored["version"], 2);
    }

    #[tokio::test]
    async fn test_replace_missing_document_fails() {
        let store = MemoryStore::new();
        let err = store
            .replace_document("categories", "ghost", json!({}), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::DocumentMissing { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store
            .create_document("categories", json!({"id": "c-1"}))
            .await
            .unwrap();

        store.delete_document("categories", "c-1").await.unwrap();
        assert!(store
            .get_document("categories", "c-1")
            .await
            .unwrap()
            .is_none());
        // Second delete of the same id still succeeds
        store.delete_document("categories", "c-1").await.unwrap();
    }
}
