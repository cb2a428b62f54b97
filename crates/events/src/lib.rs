//! Store change notifications.
//!
//! The entity store publishes a [`StoreEvent`] after every successful
//! mutation. Anything that holds ids into the store (the selection
//! controller, a re-render trigger, a change log) subscribes as a
//! [`StoreObserver`] instead of being patched up by page-level glue.

pub mod bus;
pub mod event;
pub mod observer;

pub use bus::{ChannelObserver, Subscription, channel};
pub use event::StoreEvent;
pub use observer::{ObserverSet, StoreObserver};
