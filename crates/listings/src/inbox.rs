//! Notification inbox operations.

use estatehub_core::{DomainResult, Entity, EntityId};
use estatehub_store::EntityStore;

use crate::notification::Notification;

pub trait Inbox {
    fn mark_read(&mut self, id: EntityId) -> DomainResult<()>;

    fn mark_unread(&mut self, id: EntityId) -> DomainResult<()>;

    /// Mark every unread notification read. Returns how many changed.
    fn mark_all_read(&mut self) -> usize;

    fn unread_count(&self) -> usize;

    /// Newest first.
    fn unread(&self) -> Vec<&Notification>;
}

impl Inbox for EntityStore<Notification> {
    fn mark_read(&mut self, id: EntityId) -> DomainResult<()> {
        self.update_field(id, "read", true)
    }

    fn mark_unread(&mut self, id: EntityId) -> DomainResult<()> {
        self.update_field(id, "read", false)
    }

    fn mark_all_read(&mut self) -> usize {
        let unread: Vec<EntityId> = self
            .all()
            .iter()
            .filter(|n| !n.is_read())
            .map(|n| n.id())
            .collect();

        // Ids come from this store, so `mark_read` only fails if a field
        // write is rejected; those are not counted.
        let mut changed = 0;
        for id in unread {
            if self.mark_read(id).is_ok() {
                changed += 1;
            }
        }
        changed
    }

    fn unread_count(&self) -> usize {
        self.all().iter().filter(|n| !n.is_read()).count()
    }

    fn unread(&self) -> Vec<&Notification> {
        let mut unread: Vec<&Notification> = self.all().iter().filter(|n| !n.is_read()).collect();
        unread.sort_by(|a, b| b.at().cmp(&a.at()));
        unread
    }
}
