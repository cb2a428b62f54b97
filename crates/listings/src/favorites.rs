//! Favorite/unfavorite for records that carry a `favorite` flag.

use estatehub_core::{DomainResult, Entity, EntityId};
use estatehub_query::{Predicate, PredicateSet};
use estatehub_store::EntityStore;

use crate::agent::Agent;
use crate::property::Property;

/// Records with a boolean `favorite` field.
pub trait Favoritable: Entity {
    fn is_favorite(&self) -> bool;
}

impl Favoritable for Property {
    fn is_favorite(&self) -> bool {
        Property::is_favorite(self)
    }
}

impl Favoritable for Agent {
    fn is_favorite(&self) -> bool {
        Agent::is_favorite(self)
    }
}

/// Predicate set selecting favorited records.
pub fn favorites_only() -> PredicateSet {
    PredicateSet::new().with("favorite", Predicate::Flag(true))
}

pub trait Favorites<E> {
    /// Flip the favorite flag; returns the new value.
    fn toggle_favorite(&mut self, id: EntityId) -> DomainResult<bool>;

    fn set_favorite(&mut self, id: EntityId, favorite: bool) -> DomainResult<()>;

    /// Favorited records in insertion order.
    fn favorites(&self) -> Vec<&E>;
}

impl<E: Favoritable> Favorites<E> for EntityStore<E> {
    fn toggle_favorite(&mut self, id: EntityId) -> DomainResult<bool> {
        self.toggle_flag(id, "favorite")
    }

    fn set_favorite(&mut self, id: EntityId, favorite: bool) -> DomainResult<()> {
        self.update_field(id, "favorite", favorite)
    }

    fn favorites(&self) -> Vec<&E> {
        self.all().iter().filter(|e| e.is_favorite()).collect()
    }
}
