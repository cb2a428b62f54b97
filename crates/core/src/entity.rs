//! Entity trait: identity + continuity across state changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::id::EntityId;
use crate::value::FieldValue;

/// Created/modified markers carried by every record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Timestamps {
    /// Both markers set to `at`.
    pub fn at(at: DateTime<Utc>) -> Self {
        Self {
            created_at: at,
            modified_at: at,
        }
    }

    /// Record a modification. `modified_at` never moves backwards.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        if at > self.modified_at {
            self.modified_at = at;
        }
    }
}

/// A domain record with a stable identity and a named-field view.
///
/// Concrete record types (properties, agents, notifications, ...) keep their
/// attributes as typed struct fields; this trait exposes them as a
/// `name → FieldValue` mapping so one store, one filter engine and one
/// selection controller serve every collection.
pub trait Entity {
    /// Canonical field names, `id` included.
    const FIELDS: &'static [&'static str];

    /// Alternate spellings accepted for canonical fields (`alias`, `canonical`).
    const ALIASES: &'static [(&'static str, &'static str)] = &[];

    /// Returns the entity identifier.
    fn id(&self) -> EntityId;

    /// Reads a canonical field. `None` when the name is not part of the schema.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Replaces a canonical field after validating the value.
    ///
    /// On error the record is left unchanged. `id` is never writable.
    fn set_field(&mut self, name: &str, value: FieldValue) -> DomainResult<()>;

    fn timestamps(&self) -> &Timestamps;

    fn timestamps_mut(&mut self) -> &mut Timestamps;

    /// Resolves a user-supplied field name (case-insensitive, aliases
    /// allowed) to its canonical spelling.
    fn canonical(name: &str) -> Option<&'static str> {
        let wanted = name.trim();
        Self::FIELDS
            .iter()
            .copied()
            .find(|f| f.eq_ignore_ascii_case(wanted))
            .or_else(|| {
                Self::ALIASES
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(wanted))
                    .map(|(_, canonical)| *canonical)
            })
    }
}
