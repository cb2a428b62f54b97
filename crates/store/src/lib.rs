//! In-memory entity store: the single source of truth for one collection
//! during a page session.

pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use store::EntityStore;
