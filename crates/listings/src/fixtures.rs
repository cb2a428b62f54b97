//! Seed data for the marketplace collections.
//!
//! Embedded JSON, validated through the same constructors as any other
//! record. Some entries use the older field spellings on purpose.

use std::rc::Rc;

use serde::de::DeserializeOwned;

use estatehub_core::{Clock, DomainError, DomainResult};
use estatehub_store::EntityStore;

use crate::agent::{Agent, NewAgent};
use crate::notification::{NewNotification, Notification};
use crate::property::{NewProperty, Property};

const PROPERTIES: &str = include_str!("../fixtures/properties.json");
const AGENTS: &str = include_str!("../fixtures/agents.json");
const NOTIFICATIONS: &str = include_str!("../fixtures/notifications.json");

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> DomainResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| DomainError::validation(format!("{name} fixture: {e}")))
}

pub fn properties(clock: Rc<dyn Clock>) -> DomainResult<EntityStore<Property>> {
    let now = clock.now();
    let records = parse::<NewProperty>("properties", PROPERTIES)?
        .into_iter()
        .map(|draft| Property::new(draft, now))
        .collect::<DomainResult<Vec<_>>>()?;
    EntityStore::seeded(records, clock)
}

pub fn agents(clock: Rc<dyn Clock>) -> DomainResult<EntityStore<Agent>> {
    let now = clock.now();
    let records = parse::<NewAgent>("agents", AGENTS)?
        .into_iter()
        .map(|draft| Agent::new(draft, now))
        .collect::<DomainResult<Vec<_>>>()?;
    EntityStore::seeded(records, clock)
}

pub fn notifications(clock: Rc<dyn Clock>) -> DomainResult<EntityStore<Notification>> {
    let records = parse::<NewNotification>("notifications", NOTIFICATIONS)?
        .into_iter()
        .map(Notification::new)
        .collect::<DomainResult<Vec<_>>>()?;
    EntityStore::seeded(records, clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use estatehub_core::{Entity, EntityId, SystemClock};
    use estatehub_query::{Predicate, PredicateSet, SortSpec, compute};

    use crate::property::ListingType;

    fn clock() -> Rc<dyn Clock> {
        Rc::new(SystemClock)
    }

    #[test]
    fn all_fixtures_load() {
        assert_eq!(properties(clock()).unwrap().len(), 10);
        assert_eq!(agents(clock()).unwrap().len(), 5);
        assert_eq!(notifications(clock()).unwrap().len(), 5);
    }

    #[test]
    fn legacy_spellings_land_in_canonical_fields() {
        let store = properties(clock()).unwrap();
        let bungalow = store.get(EntityId::new(4)).unwrap();
        assert_eq!(bungalow.bedrooms(), 2);
        assert_eq!(bungalow.area(), 1100);

        let studio = store.get(EntityId::new(6)).unwrap();
        assert_eq!(studio.area(), 520);
        assert_eq!(studio.listing_type(), ListingType::Rent);
    }

    #[test]
    fn rentals_under_three_thousand_sorted_by_price() {
        let store = properties(clock()).unwrap();
        let set = PredicateSet::new()
            .with("type", Predicate::equals("rent"))
            .with("price", Predicate::at_most(3000.0));

        let result = compute(store.all(), &set, Some(&SortSpec::ascending("price")));

        assert_eq!(result.ids(), vec![EntityId::new(6), EntityId::new(8)]);
    }

    #[test]
    fn verified_agents_by_rating_keep_fixture_order_on_ties() {
        let store = agents(clock()).unwrap();
        let set = PredicateSet::new().with("verified", Predicate::Flag(true));

        let result = compute(store.all(), &set, Some(&SortSpec::descending("rating")));

        // Marcus (2) and David (4) tie at 4.8.
        let ids: Vec<u64> = result.iter().map(|a| a.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }
}
