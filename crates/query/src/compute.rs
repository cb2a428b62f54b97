use estatehub_core::{Entity, EntityId};

use crate::pagination::{Page, Pagination};
use crate::predicate::PredicateSet;
use crate::sort::SortSpec;

/// Compute the visible slice of `records`.
///
/// - Only records satisfying every predicate are kept.
/// - Without a sort the result is a subsequence of `records` in input order.
/// - With a sort, ties keep their input order in either direction.
pub fn compute<'a, E: Entity>(
    records: &'a [E],
    predicates: &PredicateSet,
    sort: Option<&SortSpec>,
) -> Computed<'a, E> {
    let mut positions: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| predicates.matches(*record))
        .map(|(pos, _)| pos)
        .collect();

    if let Some(order) = sort {
        // `sort_by` is stable.
        positions.sort_by(|&a, &b| order.compare(&records[a], &records[b]));
    }

    Computed { records, positions }
}

/// Result of [`compute`].
///
/// Holds positions into the borrowed collection, not copies of records.
/// Iterate it as many times as needed; each pass yields the same sequence.
#[derive(Debug)]
pub struct Computed<'a, E> {
    records: &'a [E],
    positions: Vec<usize>,
}

impl<'a, E> Clone for Computed<'a, E> {
    fn clone(&self) -> Self {
        Self {
            records: self.records,
            positions: self.positions.clone(),
        }
    }
}

impl<'a, E: Entity> Computed<'a, E> {
    pub fn iter(&self) -> ComputedIter<'_, E> {
        ComputedIter {
            records: self.records,
            positions: self.positions.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The `n`th visible record.
    pub fn get(&self, n: usize) -> Option<&'a E> {
        self.positions.get(n).map(|&pos| &self.records[pos])
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|e| e.id()).collect()
    }

    /// Slice one page out of the sequence.
    pub fn page(&self, pagination: Pagination) -> Page<&'a E> {
        let pagination = pagination.clamped();
        let total = self.positions.len();
        let start = pagination.offset.min(total);
        let end = start.saturating_add(pagination.limit).min(total);
        let items = self.positions[start..end]
            .iter()
            .map(|&pos| &self.records[pos])
            .collect();

        Page {
            items,
            total,
            pagination,
            has_more: end < total,
        }
    }
}

impl<'c, 'a, E: Entity> IntoIterator for &'c Computed<'a, E> {
    type Item = &'c E;
    type IntoIter = ComputedIter<'c, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`Computed`] sequence.
#[derive(Debug)]
pub struct ComputedIter<'c, E> {
    records: &'c [E],
    positions: core::slice::Iter<'c, usize>,
}

impl<'c, E> Clone for ComputedIter<'c, E> {
    fn clone(&self) -> Self {
        Self {
            records: self.records,
            positions: self.positions.clone(),
        }
    }
}

impl<'c, E> Iterator for ComputedIter<'c, E> {
    type Item = &'c E;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|&pos| &self.records[pos])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<'c, E> DoubleEndedIterator for ComputedIter<'c, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.positions.next_back().map(|&pos| &self.records[pos])
    }
}

impl<'c, E> ExactSizeIterator for ComputedIter<'c, E> {}
