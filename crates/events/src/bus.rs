//! Channel-backed change feed.
//!
//! For consumers that would rather pull than be called back (a renderer that
//! batches "something changed" into one redraw, a change log). The store side
//! is an ordinary [`StoreObserver`]; the consumer side is a [`Subscription`].
//!
//! ```ignore
//! let (observer, feed) = estatehub_events::channel();
//! store.subscribe(observer);
//!
//! store.remove_by_id(id);
//! for event in feed.drain() {
//!     redraw_for(event);
//! }
//! ```

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::event::StoreEvent;
use crate::observer::StoreObserver;

/// Create a connected observer/subscription pair.
pub fn channel() -> (ChannelObserver, Subscription) {
    let (tx, rx) = mpsc::channel();
    (ChannelObserver { sender: tx }, Subscription::new(rx))
}

/// Observer half: forwards every event into the channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<StoreEvent>,
}

impl StoreObserver for ChannelObserver {
    fn notify(&mut self, event: &StoreEvent) {
        // A dropped subscription just stops receiving.
        let _ = self.sender.send(event.clone());
    }
}

/// Consumer half of a change feed.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<StoreEvent>,
}

impl Subscription {
    pub fn new(receiver: Receiver<StoreEvent>) -> Self {
        Self { receiver }
    }

    /// Take the next pending event, if any. Never blocks.
    pub fn try_recv(&self) -> Option<StoreEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Take every pending event in publication order.
    pub fn drain(&self) -> Vec<StoreEvent> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estatehub_core::EntityId;

    #[test]
    fn drain_returns_events_in_order() {
        let (mut observer, feed) = channel();
        observer.notify(&StoreEvent::Inserted { id: EntityId::new(1) });
        observer.notify(&StoreEvent::Updated {
            id: EntityId::new(1),
            field: "price".to_string(),
        });

        let events = feed.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "store.entity.inserted");
        assert_eq!(events[1].event_type(), "store.entity.updated");
        assert!(feed.try_recv().is_none());
    }

    #[test]
    fn notify_after_subscription_dropped_is_harmless() {
        let (mut observer, feed) = channel();
        drop(feed);
        observer.notify(&StoreEvent::Removed { id: EntityId::new(3) });
    }
}
