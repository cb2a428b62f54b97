//! `estatehub-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every collection
//! in the marketplace (no storage, no rendering, no IO).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{Entity, Timestamps};
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, UserId};
pub use value::{FieldKind, FieldValue};
