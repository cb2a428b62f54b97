//! Field values: the attribute side of the `name → value` record mapping.

use core::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Coarse type of a [`FieldValue`], used in validation messages and for
/// cross-kind ordering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Null,
    Bool,
    Number,
    Text,
    List,
    Time,
}

impl core::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            FieldKind::Null => "null",
            FieldKind::Bool => "bool",
            FieldKind::Number => "number",
            FieldKind::Text => "text",
            FieldKind::List => "list",
            FieldKind::Time => "time",
        };
        f.write_str(s)
    }
}

/// A single attribute value read from (or written to) a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    Time(DateTime<Utc>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Null => FieldKind::Null,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Int(_) | FieldValue::Float(_) => FieldKind::Number,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::List(_) => FieldKind::List,
            FieldValue::Time(_) => FieldKind::Time,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Numeric view (ints widen to `f64`).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Total order used by sorting.
    ///
    /// Numbers compare numerically (ints and floats together), text
    /// lexicographically, times chronologically. Values of different kinds
    /// order by [`FieldKind`], which puts `Null` first.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (Bool(a), Bool(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (List(a), List(b)) => a.cmp(b),
            (Time(a), Time(b)) => a.cmp(b),
            (Null, Null) => Ordering::Equal,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.kind().cmp(&other.kind()),
            },
        }
    }

    /// Equality under [`FieldValue::compare`] (so `Int(3)` equals `Float(3.0)`).
    pub fn same_as(&self, other: &FieldValue) -> bool {
        self.compare(other) == Ordering::Equal
    }

    pub fn expect_text(self, field: &str) -> DomainResult<String> {
        match self {
            FieldValue::Text(s) => Ok(s),
            other => Err(mismatch(field, FieldKind::Text, &other)),
        }
    }

    pub fn expect_bool(self, field: &str) -> DomainResult<bool> {
        match self {
            FieldValue::Bool(b) => Ok(b),
            other => Err(mismatch(field, FieldKind::Bool, &other)),
        }
    }

    pub fn expect_int(self, field: &str) -> DomainResult<i64> {
        match self {
            FieldValue::Int(v) => Ok(v),
            other => Err(mismatch(field, FieldKind::Number, &other)),
        }
    }

    /// Non-negative integer that fits in `u32` (counts, areas, bedrooms).
    pub fn expect_count(self, field: &str) -> DomainResult<u32> {
        let raw = self.expect_int(field)?;
        u32::try_from(raw)
            .map_err(|_| DomainError::validation(format!("{field} must be between 0 and {}", u32::MAX)))
    }

    pub fn expect_float(self, field: &str) -> DomainResult<f64> {
        match self {
            FieldValue::Int(v) => Ok(v as f64),
            FieldValue::Float(v) if v.is_finite() => Ok(v),
            FieldValue::Float(_) => Err(DomainError::validation(format!("{field} must be finite"))),
            other => Err(mismatch(field, FieldKind::Number, &other)),
        }
    }

    pub fn expect_list(self, field: &str) -> DomainResult<Vec<String>> {
        match self {
            FieldValue::List(items) => Ok(items),
            other => Err(mismatch(field, FieldKind::List, &other)),
        }
    }

    pub fn expect_time(self, field: &str) -> DomainResult<DateTime<Utc>> {
        match self {
            FieldValue::Time(at) => Ok(at),
            other => Err(mismatch(field, FieldKind::Time, &other)),
        }
    }
}

fn mismatch(field: &str, expected: FieldKind, found: &FieldValue) -> DomainError {
    DomainError::validation(format!(
        "{field} expects {expected}, got {}",
        found.kind()
    ))
}

impl core::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldValue::Null => f.write_str("-"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
            FieldValue::Time(at) => write!(f, "{}", at.to_rfc3339()),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Time(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}
