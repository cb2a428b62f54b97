use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use estatehub_core::{DomainResult, Entity, EntityId};
use estatehub_events::{StoreEvent, StoreObserver};
use estatehub_store::EntityStore;

/// Detail-view state.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    Closed,
    Open(EntityId),
}

/// Selection controller shared between a store (as observer) and a page.
pub type SharedSelection = Rc<RefCell<SelectionController>>;

/// Tracks the open record for a detail view.
///
/// Transitions:
/// - `open(id)`: any state → `Open(id)` (replaces a previous id)
/// - `close()`: any state → `Closed`
/// - store removes the open id → `Closed`
///
/// The controller holds only an id, never the record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionController {
    state: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// New controller wrapped for sharing with a store.
    pub fn shared() -> SharedSelection {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn state(&self) -> Selection {
        self.state
    }

    pub fn selected(&self) -> Option<EntityId> {
        match self.state {
            Selection::Open(id) => Some(id),
            Selection::Closed => None,
        }
    }

    pub fn is_open(&self, id: EntityId) -> bool {
        self.state == Selection::Open(id)
    }

    /// Open `id` without consulting any store.
    pub fn open(&mut self, id: EntityId) {
        self.state = Selection::Open(id);
    }

    /// Open `id` only if `store` holds it; otherwise `NotFound` and the
    /// current state is kept.
    pub fn open_checked<E: Entity>(&mut self, id: EntityId, store: &EntityStore<E>) -> DomainResult<()> {
        store.require(id)?;
        self.open(id);
        Ok(())
    }

    pub fn close(&mut self) {
        self.state = Selection::Closed;
    }

    /// The open record, looked up in `store`.
    pub fn resolve<'s, E: Entity>(&self, store: &'s EntityStore<E>) -> Option<&'s E> {
        self.selected().and_then(|id| store.get(id))
    }
}

impl StoreObserver for SelectionController {
    fn notify(&mut self, event: &StoreEvent) {
        if let StoreEvent::Removed { id } = event {
            if self.is_open(*id) {
                tracing::debug!(%id, "open record removed; closing selection");
                self.close();
            }
        }
    }
}
