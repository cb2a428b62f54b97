use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use estatehub_core::{DomainError, Entity, FieldValue};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(DomainError::validation(format!("unknown sort direction: {other}"))),
        }
    }
}

/// Which field to order by, and which way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Compare two records on this key.
    ///
    /// Equal keys compare `Equal` in both directions, which is what keeps a
    /// stable sort stable when descending. Records without the field sort
    /// as `Null` (first when ascending).
    pub fn compare<E: Entity>(&self, a: &E, b: &E) -> Ordering {
        let key = E::canonical(&self.key);
        let read = |e: &E| key.and_then(|k| e.field(k)).unwrap_or(FieldValue::Null);
        let ord = read(a).compare(&read(b));
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Parses `"price"`, `"price:asc"` or `"rating:desc"`.
impl FromStr for SortSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.split_once(':') {
            Some((key, dir)) => (key.trim(), dir.parse()?),
            None => (s.trim(), SortDirection::Ascending),
        };
        if key.is_empty() {
            return Err(DomainError::validation("sort key cannot be empty"));
        }
        Ok(Self {
            key: key.to_string(),
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::home;

    #[test]
    fn parses_key_and_direction() {
        assert_eq!("price:desc".parse::<SortSpec>().unwrap(), SortSpec::descending("price"));
        assert_eq!("rating".parse::<SortSpec>().unwrap(), SortSpec::ascending("rating"));
        assert!(":asc".parse::<SortSpec>().is_err());
        assert!("price:sideways".parse::<SortSpec>().is_err());
    }

    #[test]
    fn equal_keys_compare_equal_in_both_directions() {
        let a = home(1, 100, "Austin");
        let b = home(2, 100, "Boston");
        assert_eq!(SortSpec::ascending("price").compare(&a, &b), Ordering::Equal);
        assert_eq!(SortSpec::descending("price").compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn text_keys_sort_lexicographically() {
        let a = home(1, 1, "Austin");
        let b = home(2, 1, "Boston");
        assert_eq!(SortSpec::ascending("city").compare(&a, &b), Ordering::Less);
        assert_eq!(SortSpec::descending("city").compare(&a, &b), Ordering::Greater);
    }
}
