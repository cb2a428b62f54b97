use std::collections::HashMap;
use std::rc::Rc;

use estatehub_core::{Clock, DomainError, DomainResult, Entity, EntityId, FieldValue, SystemClock};
use estatehub_events::{ObserverSet, StoreEvent, StoreObserver};

/// Ordered, id-unique collection of records.
///
/// - Reads see records in insertion order.
/// - Field updates bump the record's `modified_at` from the store's clock.
/// - Every successful mutation is published to subscribed observers before
///   the call returns.
/// - Failed operations leave the store untouched and publish nothing.
pub struct EntityStore<E> {
    records: Vec<E>,
    index: HashMap<EntityId, usize>,
    /// Largest id ever inserted. Never lowered by removals.
    high_water: u64,
    observers: ObserverSet,
    clock: Rc<dyn Clock>,
}

impl<E: Entity> EntityStore<E> {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            high_water: 0,
            observers: ObserverSet::new(),
            clock,
        }
    }

    /// Build a store from seed records, in order.
    ///
    /// Seeding publishes nothing (there are no observers yet). Duplicate ids
    /// in the seed are rejected like any other insert.
    pub fn seeded(records: impl IntoIterator<Item = E>, clock: Rc<dyn Clock>) -> DomainResult<Self> {
        let mut store = Self::new(clock);
        for record in records {
            store.insert(record)?;
        }
        tracing::debug!(records = store.len(), "seeded entity store");
        Ok(store)
    }

    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) {
        self.observers.subscribe(observer);
    }

    /// Add a record at the end of the collection.
    pub fn insert(&mut self, entity: E) -> DomainResult<()> {
        let id = entity.id();
        if self.index.contains_key(&id) {
            return Err(DomainError::duplicate_id(id));
        }

        self.index.insert(id, self.records.len());
        self.records.push(entity);
        self.high_water = self.high_water.max(id.get());
        tracing::debug!(%id, "inserted entity");
        self.observers.publish(&StoreEvent::Inserted { id });
        Ok(())
    }

    /// Delete a record. Absent ids are a no-op and return `None`.
    pub fn remove_by_id(&mut self, id: EntityId) -> Option<E> {
        let pos = self.index.remove(&id)?;
        let removed = self.records.remove(pos);
        self.reindex_from(pos);

        tracing::debug!(%id, "removed entity");
        self.observers.publish(&StoreEvent::Removed { id });
        Some(removed)
    }

    /// Drop every record for which `keep` returns false, preserving the order
    /// of the rest. Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&E) -> bool) -> usize {
        let doomed: Vec<EntityId> = self
            .records
            .iter()
            .filter(|e| !keep(e))
            .map(|e| e.id())
            .collect();

        for id in &doomed {
            self.remove_by_id(*id);
        }
        doomed.len()
    }

    /// Replace one field, keeping every other field as it was.
    ///
    /// `field` may be an alias; the event carries the canonical name.
    pub fn update_field(
        &mut self,
        id: EntityId,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> DomainResult<()> {
        let pos = *self.index.get(&id).ok_or(DomainError::not_found(id))?;
        let canonical = E::canonical(field).ok_or_else(|| DomainError::unknown_field(field))?;

        let now = self.clock.now();
        let record = &mut self.records[pos];
        record.set_field(canonical, value.into())?;
        record.timestamps_mut().touch(now);

        tracing::debug!(%id, field = canonical, "updated entity field");
        self.observers.publish(&StoreEvent::Updated {
            id,
            field: canonical.to_string(),
        });
        Ok(())
    }

    /// Flip a boolean field (read, favorite, alerts, ...) and return the new value.
    pub fn toggle_flag(&mut self, id: EntityId, field: &str) -> DomainResult<bool> {
        let record = self.get(id).ok_or(DomainError::not_found(id))?;
        let canonical = E::canonical(field).ok_or_else(|| DomainError::unknown_field(field))?;
        let current = record
            .field(canonical)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| DomainError::validation(format!("{canonical} is not a flag")))?;

        self.update_field(id, canonical, !current)?;
        Ok(!current)
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[E] {
        &self.records
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    /// Like [`EntityStore::get`], but an absent id is an error.
    pub fn require(&self, id: EntityId) -> DomainResult<&E> {
        self.get(id).ok_or(DomainError::not_found(id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One past the largest id this store has ever held (1 for a fresh
    /// store). Removed ids are never handed out again.
    pub fn next_id(&self) -> EntityId {
        EntityId::new(self.high_water).next()
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    fn reindex_from(&mut self, start: usize) {
        for (pos, record) in self.records.iter().enumerate().skip(start) {
            self.index.insert(record.id(), pos);
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for EntityStore<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntityStore")
            .field("records", &self.records)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new(Rc::new(SystemClock))
    }
}
