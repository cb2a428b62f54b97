//! Domain error model.

use thiserror::Error;

use crate::id::EntityId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a local, caller-correctable condition. Nothing in the
/// collection core retries, logs or panics on these; the caller decides what
/// to show the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An insert collided with an id already present in the collection.
    #[error("duplicate id: {0}")]
    DuplicateId(EntityId),

    /// An operation referenced an id that is not in the collection.
    #[error("not found: {0}")]
    NotFound(EntityId),

    /// A field name is not part of the record's schema (after alias resolution).
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A value failed validation (wrong type, out of range, empty name, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(id: EntityId) -> Self {
        Self::NotFound(id)
    }

    pub fn duplicate_id(id: EntityId) -> Self {
        Self::DuplicateId(id)
    }
}
