//! Page sessions: the pieces a marketplace page works with, wired together.
//!
//! A [`CollectionView`] owns one entity store and keeps the filter, sort,
//! page and detail-selection state for it. [`Marketplace`] bundles the views
//! for one signed-in [`Identity`], which callers pass in explicitly.

pub mod identity;
pub mod marketplace;
pub mod view;

pub use identity::{Identity, Role};
pub use marketplace::{AgentFilter, DashboardSummary, Marketplace};
pub use view::CollectionView;
