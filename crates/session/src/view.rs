use estatehub_core::{DomainError, DomainResult, Entity, EntityId, FieldValue};
use estatehub_query::{Computed, Page, Pagination, Predicate, PredicateSet, SortSpec, TextSearch, compute};
use estatehub_selection::{Selection, SelectionController, SharedSelection};
use estatehub_store::EntityStore;

/// One collection as a page sees it: the store plus the current filter,
/// sort, page and detail selection.
///
/// Changing a filter or the sort goes back to the first page. The visible
/// slice is recomputed on demand from the store, so it always reflects the
/// latest mutation.
#[derive(Debug)]
pub struct CollectionView<E> {
    store: EntityStore<E>,
    selection: SharedSelection,
    predicates: PredicateSet,
    sort: Option<SortSpec>,
    pagination: Pagination,
}

impl<E: Entity> CollectionView<E> {
    /// Take ownership of `store` and subscribe a fresh selection controller
    /// to it.
    pub fn new(mut store: EntityStore<E>) -> Self {
        let selection = SelectionController::shared();
        store.subscribe(selection.clone());
        Self {
            store,
            selection,
            predicates: PredicateSet::new(),
            sort: None,
            pagination: Pagination::default(),
        }
    }

    pub fn with_sort(mut self, sort: SortSpec) -> DomainResult<Self> {
        self.set_sort(Some(sort))?;
        Ok(self)
    }

    pub fn with_page_size(mut self, size: usize) -> Self {
        self.pagination = Pagination::new(Some(size), None);
        self
    }

    // --- filters -------------------------------------------------------

    /// Set (or replace) the predicate on `field`. Aliases are accepted.
    pub fn set_predicate(&mut self, field: &str, predicate: Predicate) -> DomainResult<()> {
        let canonical = E::canonical(field).ok_or_else(|| DomainError::unknown_field(field))?;
        predicate.validate()?;
        tracing::trace!(field = canonical, ?predicate, "set predicate");
        self.predicates.insert(canonical, predicate);
        self.pagination = self.pagination.first();
        Ok(())
    }

    pub fn clear_predicate(&mut self, field: &str) -> Option<Predicate> {
        let removed = self.predicates.remove(E::canonical(field)?);
        if removed.is_some() {
            self.pagination = self.pagination.first();
        }
        removed
    }

    /// Free-text search over `fields`. A blank needle clears the search.
    pub fn set_search<I, S>(&mut self, needle: &str, fields: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pagination = self.pagination.first();
        if needle.trim().is_empty() {
            self.predicates.clear_search();
            return Ok(());
        }

        let mut canonical = Vec::new();
        for field in fields {
            let field = field.as_ref();
            canonical.push(E::canonical(field).ok_or_else(|| DomainError::unknown_field(field))?);
        }
        self.predicates.set_search(TextSearch::new(needle.trim(), canonical));
        Ok(())
    }

    /// Replace every filter at once (e.g. restoring a saved search).
    pub fn replace_predicates(&mut self, predicates: &PredicateSet) -> DomainResult<()> {
        self.predicates = predicates.canonicalize::<E>()?;
        self.pagination = self.pagination.first();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.predicates.clear();
        self.pagination = self.pagination.first();
    }

    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    // --- sort & paging -------------------------------------------------

    /// `None` restores insertion order.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> DomainResult<()> {
        self.sort = match sort {
            Some(requested) => {
                let key = E::canonical(&requested.key).ok_or_else(|| DomainError::unknown_field(requested.key.as_str()))?;
                Some(SortSpec {
                    key: key.to_string(),
                    direction: requested.direction,
                })
            }
            None => None,
        };
        self.pagination = self.pagination.first();
        Ok(())
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// The limit is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = pagination.clamped();
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Advance to the next page if there is one. Returns whether it moved.
    pub fn next_page(&mut self) -> bool {
        if self.page().has_more {
            self.pagination = self.pagination.next();
            true
        } else {
            false
        }
    }

    // --- reads ---------------------------------------------------------

    /// Every record passing the filters, in display order.
    pub fn visible(&self) -> Computed<'_, E> {
        compute(self.store.all(), &self.predicates, self.sort.as_ref())
    }

    /// The current page of [`CollectionView::visible`].
    pub fn page(&self) -> Page<&E> {
        self.visible().page(self.pagination)
    }

    pub fn store(&self) -> &EntityStore<E> {
        &self.store
    }

    /// Direct store access. Observers stay subscribed, so removals made
    /// here still close the selection.
    pub fn store_mut(&mut self) -> &mut EntityStore<E> {
        &mut self.store
    }

    // --- selection -----------------------------------------------------

    /// Open `id` in the detail view. Fails with `NotFound` for absent ids.
    pub fn open(&mut self, id: EntityId) -> DomainResult<()> {
        self.selection.borrow_mut().open_checked(id, &self.store)
    }

    pub fn close(&mut self) {
        self.selection.borrow_mut().close();
    }

    pub fn selection(&self) -> Selection {
        self.selection.borrow().state()
    }

    /// The record open in the detail view, if any.
    pub fn selected(&self) -> Option<&E> {
        let id = self.selection.borrow().selected()?;
        self.store.get(id)
    }

    // --- mutations -----------------------------------------------------

    pub fn insert(&mut self, entity: E) -> DomainResult<()> {
        self.store.insert(entity)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<E> {
        self.store.remove_by_id(id)
    }

    pub fn update_field(&mut self, id: EntityId, field: &str, value: impl Into<FieldValue>) -> DomainResult<()> {
        self.store.update_field(id, field, value)
    }

    pub fn toggle_flag(&mut self, id: EntityId, field: &str) -> DomainResult<bool> {
        self.store.toggle_flag(id, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use estatehub_core::SystemClock;
    use estatehub_listings::{Property, fixtures};

    fn view() -> CollectionView<Property> {
        CollectionView::new(fixtures::properties(Rc::new(SystemClock)).unwrap())
    }

    fn ids(view: &CollectionView<Property>) -> Vec<u64> {
        view.visible().iter().map(|p| p.id().get()).collect()
    }

    #[test]
    fn open_then_remove_closes_selection() {
        let mut v = view();
        v.open(EntityId::new(2)).unwrap();
        assert_eq!(v.selected().map(|p| p.title()), Some("Downtown Luxury Condo"));

        v.remove(EntityId::new(2));

        assert_eq!(v.selection(), Selection::Closed);
        assert!(v.selected().is_none());
    }

    #[test]
    fn removal_through_store_mut_also_closes() {
        let mut v = view();
        v.open(EntityId::new(3)).unwrap();
        v.store_mut().retain(|p| p.price() < 2_000_000);
        assert_eq!(v.selection(), Selection::Closed);
    }

    #[test]
    fn open_missing_is_not_found() {
        let mut v = view();
        assert_eq!(v.open(EntityId::new(77)), Err(DomainError::NotFound(EntityId::new(77))));
        assert_eq!(v.selection(), Selection::Closed);
    }

    #[test]
    fn alias_predicates_and_sort_are_canonicalized() {
        let mut v = view();
        v.set_predicate("beds", Predicate::at_least(4.0)).unwrap();
        v.set_sort(Some("size:desc".parse().unwrap())).unwrap();

        assert_eq!(v.sort().unwrap().key, "area");
        assert!(v.predicates().get("bedrooms").is_some());
        assert_eq!(ids(&v), vec![3, 5, 10, 1]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut v = view();
        assert!(matches!(
            v.set_predicate("garage", Predicate::Flag(true)),
            Err(DomainError::UnknownField(_))
        ));
        assert!(v.set_sort(Some(SortSpec::ascending("garage"))).is_err());
        assert!(v.set_search("pool", ["amenities"]).is_err());
    }

    #[test]
    fn search_then_blank_search_restores_everything() {
        let mut v = view();
        v.set_search("POOL", ["title", "features"]).unwrap();
        assert_eq!(ids(&v), vec![2, 3, 5]);

        v.set_search("  ", ["title"]).unwrap();
        assert_eq!(v.visible().len(), v.store().len());
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let mut v = view().with_page_size(3);
        assert!(v.next_page());
        assert_eq!(v.pagination().offset, 3);

        v.set_predicate("listing_type", Predicate::equals("sale")).unwrap();
        assert_eq!(v.pagination().offset, 0);

        let page = v.page();
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 3);
        assert!(page.has_more);
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let mut v = view();
        assert!(matches!(
            v.set_predicate("price", Predicate::at_least(f64::NAN)),
            Err(DomainError::Validation(_))
        ));
        assert!(v.set_predicate("price", Predicate::at_most(f64::INFINITY)).is_err());
        assert!(v.predicates().is_empty());
    }

    #[test]
    fn zero_page_size_is_clamped_and_paging_terminates() {
        let mut v = view();
        v.set_pagination(Pagination { limit: 0, offset: 0 });
        assert_eq!(v.pagination().limit, 1);

        let mut pages = 1;
        while v.next_page() {
            pages += 1;
            assert!(pages <= 10);
        }
        assert_eq!(pages, 10);
    }

    #[test]
    fn next_page_stops_at_the_end() {
        let mut v = view().with_page_size(4);
        assert!(v.next_page());
        assert!(v.next_page());
        assert!(!v.next_page());
        assert_eq!(v.page().items.len(), 2);
    }

    #[test]
    fn visible_reflects_updates_immediately() {
        let mut v = view();
        v.set_predicate("favorite", Predicate::Flag(true)).unwrap();
        assert_eq!(ids(&v), vec![1, 5]);

        v.toggle_flag(EntityId::new(7), "favorite").unwrap();
        assert_eq!(ids(&v), vec![1, 5, 7]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: walking pages with `next_page` yields `visible` exactly once.
            #[test]
            fn paging_covers_visible(size in 1usize..12, descending in any::<bool>()) {
                let sort = if descending { SortSpec::descending("price") } else { SortSpec::ascending("beds") };
                let mut v = view().with_sort(sort).unwrap().with_page_size(size);
                let expected = ids(&v);

                let mut walked: Vec<u64> = v.page().items.iter().map(|p| p.id().get()).collect();
                while v.next_page() {
                    walked.extend(v.page().items.iter().map(|p| p.id().get()));
                }
                prop_assert_eq!(walked, expected);
            }
        }
    }
}
