//! Acceptance tests over entity fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use estatehub_core::{DomainError, DomainResult, Entity, FieldValue};

/// A pure test applied to one field value.
///
/// A missing or `Null` field never satisfies a predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "arg", rename_all = "snake_case")]
pub enum Predicate {
    /// Value equality (`Int(3)` equals `Float(3.0)`; text is exact).
    Equals(FieldValue),
    /// Case-insensitive substring. On list fields, any element may match.
    Contains(String),
    /// Boolean flag must have this value.
    Flag(bool),
    /// Inclusive numeric range; either bound may be open.
    Range { min: Option<f64>, max: Option<f64> },
    /// Equal to at least one of the listed values.
    OneOf(Vec<FieldValue>),
}

impl Predicate {
    pub fn equals(value: impl Into<FieldValue>) -> Self {
        Self::Equals(value.into())
    }

    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    pub fn at_least(min: f64) -> Self {
        Self::Range { min: Some(min), max: None }
    }

    pub fn at_most(max: f64) -> Self {
        Self::Range { min: None, max: Some(max) }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::Range { min: Some(min), max: Some(max) }
    }

    /// Reject numbers a filter snapshot cannot reproduce (NaN, infinities).
    pub fn validate(&self) -> DomainResult<()> {
        let finite = |v: &FieldValue| !matches!(v, FieldValue::Float(f) if !f.is_finite());
        let ok = match self {
            Predicate::Range { min, max } => min.iter().chain(max.iter()).all(|b| b.is_finite()),
            Predicate::Equals(value) => finite(value),
            Predicate::OneOf(options) => options.iter().all(finite),
            Predicate::Contains(_) | Predicate::Flag(_) => true,
        };
        if ok {
            Ok(())
        } else {
            Err(DomainError::validation(format!("predicate has a non-finite bound: {self:?}")))
        }
    }

    pub fn accepts(&self, value: Option<&FieldValue>) -> bool {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return false;
        };

        match self {
            Predicate::Equals(expected) => value.same_as(expected),
            Predicate::Contains(needle) => contains_ci(value, needle),
            Predicate::Flag(expected) => value.as_bool() == Some(*expected),
            Predicate::Range { min, max } => match value.as_f64() {
                Some(v) => min.is_none_or(|lo| v >= lo) && max.is_none_or(|hi| v <= hi),
                None => false,
            },
            Predicate::OneOf(options) => options.iter().any(|o| value.same_as(o)),
        }
    }
}

fn contains_ci(value: &FieldValue, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    match value {
        FieldValue::Text(s) => s.to_lowercase().contains(&needle),
        FieldValue::List(items) => items.iter().any(|s| s.to_lowercase().contains(&needle)),
        _ => false,
    }
}

/// Free-text search across several fields (OR across fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSearch {
    pub needle: String,
    pub fields: Vec<String>,
}

impl TextSearch {
    pub fn new<I, S>(needle: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            needle: needle.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Blank needles match everything.
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        let needle = self.needle.trim();
        if needle.is_empty() {
            return true;
        }
        self.fields.iter().any(|f| {
            let value = E::canonical(f).and_then(|name| entity.field(name));
            value.is_some_and(|v| contains_ci(&v, needle))
        })
    }
}

/// Field name → predicate, combined with logical AND, plus an optional
/// free-text search.
///
/// Keys may be written in alias form; they are resolved against the record
/// type when evaluated. Serializes to a compact JSON snapshot so a search can
/// be recorded in history and restored later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredicateSet {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<String, Predicate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search: Option<TextSearch>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`PredicateSet::insert`].
    pub fn with(mut self, field: impl Into<String>, predicate: Predicate) -> Self {
        self.insert(field, predicate);
        self
    }

    /// Set (or replace) the predicate on `field`.
    pub fn insert(&mut self, field: impl Into<String>, predicate: Predicate) -> Option<Predicate> {
        self.fields.insert(field.into(), predicate)
    }

    pub fn remove(&mut self, field: &str) -> Option<Predicate> {
        self.fields.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&Predicate> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Predicate)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn set_search(&mut self, search: TextSearch) {
        self.search = Some(search);
    }

    pub fn clear_search(&mut self) -> Option<TextSearch> {
        self.search.take()
    }

    pub fn search(&self) -> Option<&TextSearch> {
        self.search.as_ref()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.search = None;
    }

    /// Number of active criteria (field predicates plus a non-blank search).
    pub fn len(&self) -> usize {
        let search = self
            .search
            .as_ref()
            .is_some_and(|s| !s.needle.trim().is_empty());
        self.fields.len() + usize::from(search)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `entity` satisfies every active criterion.
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        let fields_ok = self.fields.iter().all(|(name, predicate)| {
            let value = E::canonical(name).and_then(|canonical| entity.field(canonical));
            predicate.accepts(value.as_ref())
        });
        fields_ok && self.search.as_ref().is_none_or(|s| s.matches(entity))
    }

    /// Copy with every key rewritten to its canonical spelling for `E`.
    ///
    /// Fails with `UnknownField` on the first key the schema doesn't know.
    pub fn canonicalize<E: Entity>(&self) -> DomainResult<PredicateSet> {
        let mut out = PredicateSet::new();
        for (name, predicate) in &self.fields {
            let canonical = E::canonical(name).ok_or_else(|| DomainError::unknown_field(name.as_str()))?;
            predicate.validate()?;
            out.fields.insert(canonical.to_string(), predicate.clone());
        }
        if let Some(search) = &self.search {
            let mut fields = Vec::with_capacity(search.fields.len());
            for name in &search.fields {
                let canonical = E::canonical(name).ok_or_else(|| DomainError::unknown_field(name.as_str()))?;
                fields.push(canonical.to_string());
            }
            out.search = Some(TextSearch {
                needle: search.needle.clone(),
                fields,
            });
        }
        Ok(out)
    }

    /// Compact JSON rendering, suitable for a history entry. Round-trips
    /// through [`PredicateSet::from_snapshot`] for sets that pass
    /// [`Predicate::validate`].
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_snapshot(snapshot: &str) -> DomainResult<Self> {
        if snapshot.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(snapshot)
            .map_err(|e| DomainError::validation(format!("invalid filter snapshot: {e}")))
    }
}
