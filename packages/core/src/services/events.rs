//! Domain Events for the Category Service
//!
//! Events emitted by `CategoryService` after a persistence write succeeds,
//! via a tokio broadcast channel (observer pattern). Subscribers (UI layers,
//! cache invalidators) react to catalog changes without coupling to the
//! service internals. Events are never emitted for failed or rejected
//! operations.

use serde::{Deserialize, Serialize};

/// Domain events emitted on committed catalog changes
///
/// `root_id` is always the owning root aggregate: subscribers that mirror
/// documents only need to refetch that one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CategoryEvent {
    /// A category was created (`id` may equal `root_id` for a new root)
    #[serde(rename_all = "camelCase")]
    CategoryCreated { id: String, root_id: String },

    /// A category's fields were updated
    #[serde(rename_all = "camelCase")]
    CategoryUpdated { id: String, root_id: String },

    /// A category and its entire subtree were deleted
    #[serde(rename_all = "camelCase")]
    CategoryDeleted { id: String, root_id: String },
}

impl CategoryEvent {
    /// Get a string representation of the event type
    pub fn event_type(&self) -> &str {
        match self {
            CategoryEvent::CategoryCreated { .. } => "category:created",
            CategoryEvent::CategoryUpdated { .. } => "category:updated",
            CategoryEvent::CategoryDeleted { .. } => "category:deleted",
        }
    }

    /// Id of the root aggregate the event touched
    pub fn root_id(&self) -> &str {
        match self {
            CategoryEvent::CategoryCreated { root_id, .. }
            | CategoryEvent::CategoryUpdated { root_id, .. }
            | CategoryEvent::CategoryDeleted { root_id, .. } => root_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        let event = CategoryEvent::CategoryCreated {
            id: "c-1".into(),
            root_id: "r-1".into(),
        };
        assert_eq!(event.event_type(), "category:created");
        assert_eq!(event.root_id(), "r-1");
    }

    /// Contract test: the JSON shape consumed by subscribers
    #[test]
    fn test_event_json_format() {
        let event = CategoryEvent::CategoryDeleted {
            id: "c-9".into(),
            root_id: "r-2".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "categoryDeleted");
        assert_eq!(json["id"], "c-9");
        assert_eq!(json["rootId"], "r-2");
    }
}
