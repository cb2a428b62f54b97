//! Observer registration and synchronous fan-out.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::StoreEvent;

/// Receives store events.
///
/// Called synchronously from inside the mutating store operation, so by the
/// time `insert`/`remove_by_id`/`update_field` returns every observer has seen
/// the event. Observers must not call back into the store.
pub trait StoreObserver {
    fn notify(&mut self, event: &StoreEvent);
}

/// Shared observers: the store holds one handle, the page holds another to
/// read state back.
impl<O> StoreObserver for Rc<RefCell<O>>
where
    O: StoreObserver + ?Sized,
{
    fn notify(&mut self, event: &StoreEvent) {
        self.borrow_mut().notify(event);
    }
}

/// Ordered list of observers owned by a store.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn StoreObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Deliver `event` to every observer in subscription order.
    pub fn publish(&mut self, event: &StoreEvent) {
        tracing::trace!(event_type = event.event_type(), id = %event.id(), observers = self.observers.len(), "publishing store event");
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl core::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estatehub_core::EntityId;

    #[derive(Default)]
    struct Counter {
        removed: usize,
    }

    impl StoreObserver for Counter {
        fn notify(&mut self, event: &StoreEvent) {
            if matches!(event, StoreEvent::Removed { .. }) {
                self.removed += 1;
            }
        }
    }

    #[test]
    fn publish_reaches_shared_observers() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut set = ObserverSet::new();
        set.subscribe(counter.clone());

        set.publish(&StoreEvent::Removed { id: EntityId::new(1) });
        set.publish(&StoreEvent::Inserted { id: EntityId::new(2) });

        assert_eq!(counter.borrow().removed, 1);
    }

    struct Tagged {
        tag: &'static str,
        log: Rc<RefCell<Vec<(&'static str, EntityId)>>>,
    }

    impl StoreObserver for Tagged {
        fn notify(&mut self, event: &StoreEvent) {
            self.log.borrow_mut().push((self.tag, event.id()));
        }
    }

    #[test]
    fn observers_run_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = ObserverSet::new();
        set.subscribe(Tagged { tag: "first", log: log.clone() });
        set.subscribe(Tagged { tag: "second", log: log.clone() });

        set.publish(&StoreEvent::Inserted { id: EntityId::new(9) });

        assert_eq!(
            *log.borrow(),
            vec![("first", EntityId::new(9)), ("second", EntityId::new(9))]
        );
        assert_eq!(set.len(), 2);
    }
}
