//! Filter/sort engine over entity collections.
//!
//! `compute(records, predicates, sort)` maps a collection to the ordered
//! subsequence a page should show. It is pure: it only borrows the records
//! and never mutates them or the store they came from.

pub mod compute;
pub mod pagination;
pub mod predicate;
pub mod sort;

#[cfg(test)]
pub(crate) mod testing;

pub use compute::{Computed, ComputedIter, compute};
pub use pagination::{Page, Pagination};
pub use predicate::{Predicate, PredicateSet, TextSearch};
pub use sort::{SortDirection, SortSpec};
