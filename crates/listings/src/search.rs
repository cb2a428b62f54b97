//! Search history and saved searches.

use chrono::{DateTime, Utc};

use estatehub_core::{Clock, DomainError, DomainResult, Entity, EntityId, FieldValue, Timestamps};
use estatehub_query::PredicateSet;
use estatehub_store::EntityStore;

use crate::validate::{id_value, non_empty, read_only};

/// One executed search: what was typed, which filters were active, how many
/// results came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistoryEntry {
    id: EntityId,
    query: String,
    filters: String,
    result_count: u32,
    at: DateTime<Utc>,
    timestamps: Timestamps,
}

impl SearchHistoryEntry {
    pub fn new(
        id: EntityId,
        query: impl Into<String>,
        predicates: &PredicateSet,
        result_count: usize,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            query: query.into(),
            filters: predicates.snapshot(),
            result_count: u32::try_from(result_count).unwrap_or(u32::MAX),
            at,
            timestamps: Timestamps::at(at),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// JSON snapshot of the filters in effect.
    pub fn filters(&self) -> &str {
        &self.filters
    }

    pub fn predicates(&self) -> DomainResult<PredicateSet> {
        PredicateSet::from_snapshot(&self.filters)
    }

    pub fn result_count(&self) -> u32 {
        self.result_count
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }
}

impl Entity for SearchHistoryEntry {
    const FIELDS: &'static [&'static str] = &["id", "query", "filters", "result_count", "at"];
    const ALIASES: &'static [(&'static str, &'static str)] =
        &[("results", "result_count"), ("timestamp", "at")];

    fn id(&self) -> EntityId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => id_value(self.id),
            "query" => self.query.clone().into(),
            "filters" => self.filters.clone().into(),
            "result_count" => self.result_count.into(),
            "at" => self.at.into(),
            _ => return None,
        };
        Some(value)
    }

    /// History is append-only; entries are removed, never edited.
    fn set_field(&mut self, name: &str, _value: FieldValue) -> DomainResult<()> {
        if Self::FIELDS.contains(&name) {
            Err(read_only(name))
        } else {
            Err(DomainError::unknown_field(name))
        }
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }
}

/// A named search the user can re-run, optionally with alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSearch {
    id: EntityId,
    name: String,
    query: String,
    filters: String,
    alerts: bool,
    timestamps: Timestamps,
}

impl SavedSearch {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        query: impl Into<String>,
        predicates: &PredicateSet,
        at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: non_empty("name", name.into())?,
            query: query.into(),
            filters: predicates.snapshot(),
            alerts: false,
            timestamps: Timestamps::at(at),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &str {
        &self.filters
    }

    pub fn predicates(&self) -> DomainResult<PredicateSet> {
        PredicateSet::from_snapshot(&self.filters)
    }

    pub fn alerts(&self) -> bool {
        self.alerts
    }
}

impl Entity for SavedSearch {
    const FIELDS: &'static [&'static str] = &["id", "name", "query", "filters", "alerts"];
    const ALIASES: &'static [(&'static str, &'static str)] = &[("notify", "alerts")];

    fn id(&self) -> EntityId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => id_value(self.id),
            "name" => self.name.clone().into(),
            "query" => self.query.clone().into(),
            "filters" => self.filters.clone().into(),
            "alerts" => self.alerts.into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> DomainResult<()> {
        match name {
            "name" => self.name = non_empty(name, value.expect_text(name)?)?,
            "alerts" => self.alerts = value.expect_bool(name)?,
            "query" => self.query = value.expect_text(name)?,
            "filters" => {
                let text = value.expect_text(name)?;
                // Only accept snapshots that restore.
                PredicateSet::from_snapshot(&text)?;
                self.filters = text;
            }
            "id" => return Err(read_only(name)),
            other => return Err(DomainError::unknown_field(other)),
        }
        Ok(())
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }
}

/// Search-history operations on a history store.
pub trait SearchLog {
    /// Append an entry for a search that just ran.
    fn record_search(
        &mut self,
        query: &str,
        predicates: &PredicateSet,
        result_count: usize,
    ) -> DomainResult<EntityId>;

    /// Most recent entries first.
    fn recent(&self, limit: usize) -> Vec<&SearchHistoryEntry>;

    /// Remove every entry. Returns how many were removed.
    fn clear_history(&mut self) -> usize;
}

impl SearchLog for EntityStore<SearchHistoryEntry> {
    fn record_search(
        &mut self,
        query: &str,
        predicates: &PredicateSet,
        result_count: usize,
    ) -> DomainResult<EntityId> {
        let id = self.next_id();
        let at = self.clock().now();
        self.insert(SearchHistoryEntry::new(id, query.trim(), predicates, result_count, at))?;
        tracing::trace!(%id, result_count, "recorded search");
        Ok(id)
    }

    fn recent(&self, limit: usize) -> Vec<&SearchHistoryEntry> {
        self.all().iter().rev().take(limit).collect()
    }

    fn clear_history(&mut self) -> usize {
        let removed = self.retain(|_| false);
        tracing::debug!(removed, "cleared search history");
        removed
    }
}

/// Saved-search operations.
pub trait SavedSearches {
    fn save_search(&mut self, name: &str, query: &str, predicates: &PredicateSet) -> DomainResult<EntityId>;

    /// Flip alerts on or off; returns the new setting.
    fn toggle_alerts(&mut self, id: EntityId) -> DomainResult<bool>;

    fn find_by_name(&self, name: &str) -> Option<&SavedSearch>;
}

impl SavedSearches for EntityStore<SavedSearch> {
    fn save_search(&mut self, name: &str, query: &str, predicates: &PredicateSet) -> DomainResult<EntityId> {
        if self.find_by_name(name).is_some() {
            return Err(DomainError::validation(format!("a saved search named {name:?} already exists")));
        }
        let id = self.next_id();
        let at = self.clock().now();
        self.insert(SavedSearch::new(id, name.trim(), query.trim(), predicates, at)?)?;
        Ok(id)
    }

    fn toggle_alerts(&mut self, id: EntityId) -> DomainResult<bool> {
        self.toggle_flag(id, "alerts")
    }

    fn find_by_name(&self, name: &str) -> Option<&SavedSearch> {
        let name = name.trim();
        self.all().iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }
}
