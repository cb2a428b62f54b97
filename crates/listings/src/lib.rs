//! Marketplace record schemas.
//!
//! One explicit, validated type per domain record. Each exposes canonical
//! field names plus the alternate spellings older pages used (`beds`,
//! `size`, ...), so every collection runs through the same store and the
//! same filter engine.

pub mod agent;
pub mod favorites;
pub mod fixtures;
pub mod inbox;
pub mod notification;
pub mod property;
pub mod search;

mod validate;

pub use agent::{Agent, NewAgent};
pub use favorites::{Favoritable, Favorites, favorites_only};
pub use inbox::Inbox;
pub use notification::{NewNotification, Notification, NotificationKind};
pub use property::{ListingType, NewProperty, Property};
pub use search::{SavedSearch, SavedSearches, SearchHistoryEntry, SearchLog};
