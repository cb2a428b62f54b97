use serde::{Deserialize, Serialize};

use estatehub_core::EntityId;

/// A fact about a completed store mutation.
///
/// Published synchronously, after the mutation, in the order mutations
/// happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreEvent {
    Inserted { id: EntityId },
    Removed { id: EntityId },
    Updated { id: EntityId, field: String },
}

impl StoreEvent {
    /// Stable event name (e.g. "store.entity.removed").
    pub fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::Inserted { .. } => "store.entity.inserted",
            StoreEvent::Removed { .. } => "store.entity.removed",
            StoreEvent::Updated { .. } => "store.entity.updated",
        }
    }

    /// The record the event is about.
    pub fn id(&self) -> EntityId {
        match self {
            StoreEvent::Inserted { id } | StoreEvent::Removed { id } | StoreEvent::Updated { id, .. } => *id,
        }
    }
}
