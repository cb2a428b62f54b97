use std::rc::Rc;

use chrono::{Duration, TimeZone, Utc};
use estatehub_core::{Clock, DomainError, Entity, EntityId, ManualClock, UserId};
use estatehub_query::{Pagination, Predicate};
use estatehub_selection::Selection;
use estatehub_session::{AgentFilter, Identity, Marketplace, Role};

fn session() -> (Rc<ManualClock>, Marketplace) {
    let clock = Rc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 5, 9, 0, 0).unwrap()));
    let identity = Identity::new(UserId::new(), "Jordan Lee", "jordan@example.com", Role::Buyer).unwrap();
    let shared: Rc<dyn Clock> = clock.clone();
    let market = Marketplace::from_fixtures(identity, shared).unwrap();
    (clock, market)
}

fn ids<'a, E: Entity + 'a>(items: impl IntoIterator<Item = &'a E>) -> Vec<u64> {
    items.into_iter().map(|e| e.id().get()).collect()
}

#[test]
fn search_filter_save_and_restore() {
    let (clock, mut market) = session();

    assert_eq!(market.search_properties("austin").unwrap(), 6);
    clock.advance(Duration::minutes(1));
    assert_eq!(market.filter_properties("beds", Predicate::at_least(3.0)).unwrap(), 2);
    assert_eq!(ids(market.properties().visible().iter()), vec![1, 7]);

    let saved = market.save_current_search("Austin family homes").unwrap();
    assert!(matches!(
        market.save_current_search("austin family homes"),
        Err(DomainError::Validation(_))
    ));

    market.properties_mut().clear_filters();
    assert_eq!(market.properties().visible().len(), 10);

    clock.advance(Duration::minutes(1));
    assert_eq!(market.apply_saved_search(saved).unwrap(), 2);
    assert_eq!(market.query(), "austin");
    assert_eq!(market.history().len(), 3);
}

#[test]
fn history_rerun_restores_filters() {
    let (_clock, mut market) = session();
    market.search_properties("pool").unwrap();
    let first = market.history().all()[0].id();

    market.search_properties("barn").unwrap();
    assert_eq!(ids(market.properties().visible().iter()), vec![10]);

    assert_eq!(market.rerun_search(first).unwrap(), 3);
    assert_eq!(market.query(), "pool");

    assert_eq!(market.clear_history(), 3);
    assert_eq!(
        market.rerun_search(first).unwrap_err(),
        DomainError::NotFound(first)
    );
}

#[test]
fn blank_search_is_not_recorded() {
    let (_clock, mut market) = session();
    assert_eq!(market.search_properties("   ").unwrap(), 10);
    assert!(market.history().is_empty());
}

#[test]
fn agent_discovery() {
    let (_clock, mut market) = session();

    let verified = AgentFilter {
        min_rating: Some(4.8),
        verified_only: true,
        ..AgentFilter::default()
    };
    assert_eq!(market.find_agents(&verified).unwrap(), 3);
    assert_eq!(ids(market.agents().visible().iter()), vec![1, 2, 4]);

    let rentals = AgentFilter {
        specialty: Some("RENTALS".to_string()),
        ..AgentFilter::default()
    };
    market.find_agents(&rentals).unwrap();
    assert_eq!(ids(market.agents().visible().iter()), vec![4, 3]);

    let round_rock = AgentFilter {
        location: Some("round rock".to_string()),
        ..AgentFilter::default()
    };
    market.find_agents(&round_rock).unwrap();
    assert_eq!(ids(market.agents().visible().iter()), vec![4]);
}

#[test]
fn listing_agent_and_agent_listings() {
    let (_clock, market) = session();
    let agent = market.listing_agent(EntityId::new(5)).unwrap().unwrap();
    assert_eq!(agent.name(), "Marcus Williams");
    assert_eq!(ids(market.agent_listings(EntityId::new(1))), vec![1, 3, 7]);
    assert!(market.listing_agent(EntityId::new(99)).is_err());
}

#[test]
fn notifications_open_read_and_delete() {
    let (_clock, mut market) = session();

    assert_eq!(ids(market.notifications().visible().iter()), vec![4, 2, 1, 3, 5]);
    assert_eq!(market.dashboard().unread_notifications, 3);

    market.open_notification(EntityId::new(4)).unwrap();
    assert_eq!(market.notifications().selection(), Selection::Open(EntityId::new(4)));
    assert_eq!(market.dashboard().unread_notifications, 2);

    market.delete_notification(EntityId::new(4));
    assert_eq!(market.notifications().selection(), Selection::Closed);
    assert!(market.delete_notification(EntityId::new(4)).is_none());

    assert_eq!(market.mark_all_notifications_read(), 2);
    market.mark_notification_unread(EntityId::new(5)).unwrap();
    assert_eq!(market.dashboard().unread_notifications, 1);
}

#[test]
fn favorites_feed_the_dashboard() {
    let (_clock, mut market) = session();
    let before = market.dashboard();
    assert_eq!(before.greeting, "Welcome back, Jordan");
    assert_eq!(before.favorite_properties, 2);
    assert_eq!(before.favorite_agents, 1);

    assert!(market.toggle_property_favorite(EntityId::new(9)).unwrap());
    assert!(market.toggle_agent_favorite(EntityId::new(3)).unwrap());
    assert!(!market.toggle_property_favorite(EntityId::new(1)).unwrap());

    assert_eq!(ids(market.favorite_properties()), vec![5, 9]);
    assert_eq!(ids(market.favorite_agents()), vec![1, 3]);
}

#[test]
fn dashboard_lists_recent_searches_newest_first() {
    let (_clock, mut market) = session();
    market.search_properties("loft").unwrap();
    market.search_properties("ranch").unwrap();
    market.properties_mut().set_search("", ["title"]).unwrap();
    market.filter_properties("listing_type", Predicate::equals("rent")).unwrap();

    let recent = market.dashboard().recent_searches;
    assert_eq!(
        recent,
        vec![
            "ranch (3 results)".to_string(),
            "ranch (1 results)".to_string(),
            "loft (1 results)".to_string(),
        ]
    );
}

#[test]
fn property_pages_walk_the_whole_result() {
    let (_clock, mut market) = session();
    market
        .properties_mut()
        .set_sort(Some("price:asc".parse().unwrap()))
        .unwrap();
    market.properties_mut().set_pagination(Pagination::page(1, 4));

    let mut seen = market.property_page_ids();
    while market.properties_mut().next_page() {
        seen.extend(market.property_page_ids());
    }

    let prices: Vec<i64> = seen
        .iter()
        .map(|id| market.properties().store().get(*id).unwrap().price())
        .collect();
    assert_eq!(seen.len(), 10);
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));
}
