//! Detail-view selection: which single record (if any) is open.

pub mod controller;

pub use controller::{Selection, SelectionController, SharedSelection};
