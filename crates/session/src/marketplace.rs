use std::rc::Rc;

use serde::Serialize;

use estatehub_core::{Clock, DomainResult, Entity, EntityId};
use estatehub_listings::{
    Agent, Favorites, Inbox, Notification, Property, SavedSearch, SavedSearches, SearchHistoryEntry,
    SearchLog, fixtures,
};
use estatehub_query::{Predicate, SortSpec};
use estatehub_store::EntityStore;

use crate::identity::Identity;
use crate::view::CollectionView;

/// Fields the property search box looks in.
pub const PROPERTY_SEARCH_FIELDS: [&str; 4] = ["title", "location", "property_type", "features"];

/// Fields the agent search box looks in.
pub const AGENT_SEARCH_FIELDS: [&str; 3] = ["name", "location", "specialties"];

/// How many recent searches the dashboard lists.
const DASHBOARD_RECENT: usize = 5;

/// Agent-discovery criteria. Unset fields don't filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentFilter {
    pub location: Option<String>,
    pub specialty: Option<String>,
    pub min_rating: Option<f64>,
    pub verified_only: bool,
}

/// Counts shown on the user dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub greeting: String,
    pub favorite_properties: usize,
    pub favorite_agents: usize,
    pub unread_notifications: usize,
    pub saved_searches: usize,
    pub recent_searches: Vec<String>,
}

/// All collections for one signed-in user's session.
#[derive(Debug)]
pub struct Marketplace {
    identity: Identity,
    properties: CollectionView<Property>,
    agents: CollectionView<Agent>,
    notifications: CollectionView<Notification>,
    history: EntityStore<SearchHistoryEntry>,
    saved: EntityStore<SavedSearch>,
    query: String,
}

impl Marketplace {
    pub fn new(
        identity: Identity,
        properties: EntityStore<Property>,
        agents: EntityStore<Agent>,
        notifications: EntityStore<Notification>,
        clock: Rc<dyn Clock>,
    ) -> DomainResult<Self> {
        Ok(Self {
            identity,
            properties: CollectionView::new(properties),
            agents: CollectionView::new(agents).with_sort(SortSpec::descending("rating"))?,
            notifications: CollectionView::new(notifications).with_sort(SortSpec::descending("at"))?,
            history: EntityStore::new(clock.clone()),
            saved: EntityStore::new(clock),
            query: String::new(),
        })
    }

    /// Session seeded from the bundled fixtures.
    pub fn from_fixtures(identity: Identity, clock: Rc<dyn Clock>) -> DomainResult<Self> {
        let properties = fixtures::properties(clock.clone())?;
        let agents = fixtures::agents(clock.clone())?;
        let notifications = fixtures::notifications(clock.clone())?;
        let market = Self::new(identity, properties, agents, notifications, clock)?;
        tracing::info!(
            user = %market.identity.user_id(),
            properties = market.properties.store().len(),
            agents = market.agents.store().len(),
            notifications = market.notifications.store().len(),
            "marketplace session ready"
        );
        Ok(market)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn properties(&self) -> &CollectionView<Property> {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut CollectionView<Property> {
        &mut self.properties
    }

    pub fn agents(&self) -> &CollectionView<Agent> {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut CollectionView<Agent> {
        &mut self.agents
    }

    pub fn notifications(&self) -> &CollectionView<Notification> {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut CollectionView<Notification> {
        &mut self.notifications
    }

    pub fn history(&self) -> &EntityStore<SearchHistoryEntry> {
        &self.history
    }

    pub fn saved_searches(&self) -> &EntityStore<SavedSearch> {
        &self.saved
    }

    /// The text currently in the property search box.
    pub fn query(&self) -> &str {
        &self.query
    }

    // --- property search ----------------------------------------------

    /// Run a free-text property search with the current filters and record
    /// it in history. Returns the number of matches.
    pub fn search_properties(&mut self, query: &str) -> DomainResult<usize> {
        self.query = query.trim().to_string();
        self.properties.set_search(&self.query, PROPERTY_SEARCH_FIELDS)?;
        self.record_current_search()
    }

    /// Ids on the current property page, for renderers that only need keys.
    pub fn property_page_ids(&self) -> Vec<EntityId> {
        self.properties.page().items.iter().map(|p| p.id()).collect()
    }

    /// Add or replace one property filter and record the resulting search.
    pub fn filter_properties(&mut self, field: &str, predicate: Predicate) -> DomainResult<usize> {
        self.properties.set_predicate(field, predicate)?;
        self.record_current_search()
    }

    fn record_current_search(&mut self) -> DomainResult<usize> {
        let count = self.properties.visible().len();
        if !self.properties.predicates().is_empty() {
            self.history
                .record_search(&self.query, self.properties.predicates(), count)?;
        }
        tracing::debug!(query = %self.query, results = count, "property search");
        Ok(count)
    }

    /// Save the current query and filters under `name`.
    pub fn save_current_search(&mut self, name: &str) -> DomainResult<EntityId> {
        let id = self
            .saved
            .save_search(name, &self.query, self.properties.predicates())?;
        tracing::debug!(%id, name, "saved search");
        Ok(id)
    }

    /// Restore a saved search's query and filters. Returns the match count.
    pub fn apply_saved_search(&mut self, id: EntityId) -> DomainResult<usize> {
        let saved = self.saved.require(id)?;
        let predicates = saved.predicates()?;
        let query = saved.query().to_string();

        self.properties.replace_predicates(&predicates)?;
        self.query = query;
        self.record_current_search()
    }

    /// Re-run an entry from search history.
    pub fn rerun_search(&mut self, history_id: EntityId) -> DomainResult<usize> {
        let entry = self.history.require(history_id)?;
        let predicates = entry.predicates()?;
        let query = entry.query().to_string();

        self.properties.replace_predicates(&predicates)?;
        self.query = query;
        self.record_current_search()
    }

    pub fn toggle_saved_search_alerts(&mut self, id: EntityId) -> DomainResult<bool> {
        self.saved.toggle_alerts(id)
    }

    pub fn delete_saved_search(&mut self, id: EntityId) -> Option<SavedSearch> {
        self.saved.remove_by_id(id)
    }

    pub fn clear_history(&mut self) -> usize {
        self.history.clear_history()
    }

    // --- agents --------------------------------------------------------

    /// Replace the agent filters with `filter`. Returns the match count.
    pub fn find_agents(&mut self, filter: &AgentFilter) -> DomainResult<usize> {
        self.agents.clear_filters();
        if let Some(location) = filter.location.as_deref().filter(|s| !s.trim().is_empty()) {
            self.agents.set_predicate("location", Predicate::contains(location.trim()))?;
        }
        if let Some(specialty) = filter.specialty.as_deref().filter(|s| !s.trim().is_empty()) {
            self.agents.set_predicate("specialties", Predicate::contains(specialty.trim()))?;
        }
        if let Some(min) = filter.min_rating {
            self.agents.set_predicate("rating", Predicate::at_least(min))?;
        }
        if filter.verified_only {
            self.agents.set_predicate("verified", Predicate::Flag(true))?;
        }
        Ok(self.agents.visible().len())
    }

    /// The agent a property is listed with.
    pub fn listing_agent(&self, property_id: EntityId) -> DomainResult<Option<&Agent>> {
        let property = self.properties.store().require(property_id)?;
        Ok(property.agent_id().and_then(|id| self.agents.store().get(id)))
    }

    /// Properties listed with `agent_id`, in insertion order.
    pub fn agent_listings(&self, agent_id: EntityId) -> Vec<&Property> {
        self.properties
            .store()
            .all()
            .iter()
            .filter(|p| p.agent_id() == Some(agent_id))
            .collect()
    }

    // --- favorites -----------------------------------------------------

    pub fn toggle_property_favorite(&mut self, id: EntityId) -> DomainResult<bool> {
        self.properties.store_mut().toggle_favorite(id)
    }

    pub fn toggle_agent_favorite(&mut self, id: EntityId) -> DomainResult<bool> {
        self.agents.store_mut().toggle_favorite(id)
    }

    pub fn favorite_properties(&self) -> Vec<&Property> {
        self.properties.store().favorites()
    }

    pub fn favorite_agents(&self) -> Vec<&Agent> {
        self.agents.store().favorites()
    }

    // --- notifications -------------------------------------------------

    pub fn mark_notification_read(&mut self, id: EntityId) -> DomainResult<()> {
        self.notifications.store_mut().mark_read(id)
    }

    pub fn mark_notification_unread(&mut self, id: EntityId) -> DomainResult<()> {
        self.notifications.store_mut().mark_unread(id)
    }

    pub fn mark_all_notifications_read(&mut self) -> usize {
        self.notifications.store_mut().mark_all_read()
    }

    /// Open a notification in the detail view, marking it read.
    pub fn open_notification(&mut self, id: EntityId) -> DomainResult<()> {
        self.notifications.open(id)?;
        self.mark_notification_read(id)
    }

    pub fn delete_notification(&mut self, id: EntityId) -> Option<Notification> {
        self.notifications.remove(id)
    }

    // --- dashboard -----------------------------------------------------

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary {
            greeting: format!("Welcome back, {}", self.identity.first_name()),
            favorite_properties: self.favorite_properties().len(),
            favorite_agents: self.favorite_agents().len(),
            unread_notifications: self.notifications.store().unread_count(),
            saved_searches: self.saved.len(),
            recent_searches: self
                .history
                .recent(DASHBOARD_RECENT)
                .into_iter()
                .map(|entry| match entry.query() {
                    "" => format!("(filters only, {} results)", entry.result_count()),
                    q => format!("{q} ({} results)", entry.result_count()),
                })
                .collect(),
        }
    }
}
