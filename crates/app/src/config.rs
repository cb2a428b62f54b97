//! Environment configuration for the demo binary.

use anyhow::Context;

use estatehub_observability::LogFormat;
use estatehub_query::{SortSpec, pagination::DEFAULT_PAGE_SIZE};

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `ESTATEHUB_PAGE_SIZE`, default 20.
    pub page_size: usize,
    /// `ESTATEHUB_SORT`, e.g. `price:asc`.
    pub sort: Option<SortSpec>,
    /// `ESTATEHUB_QUERY`, free-text property search.
    pub query: String,
    /// `ESTATEHUB_LOG_FORMAT`, `json` (default) or `pretty`.
    pub log_format: LogFormat,
    /// `ESTATEHUB_USER`, display name for the demo identity.
    pub user_name: String,
    /// `ESTATEHUB_EMAIL`.
    pub user_email: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            query: String::new(),
            log_format: LogFormat::Json,
            user_name: "Demo User".to_string(),
            user_email: "demo@estatehub.local".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the process env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let page_size = match lookup("ESTATEHUB_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("ESTATEHUB_PAGE_SIZE must be a positive integer, got {raw:?}"))?,
            None => defaults.page_size,
        };

        let sort = lookup("ESTATEHUB_SORT")
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| raw.parse::<SortSpec>().with_context(|| format!("invalid ESTATEHUB_SORT {raw:?}")))
            .transpose()?;

        let log_format = match lookup("ESTATEHUB_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(anyhow::Error::msg)?,
            None => defaults.log_format,
        };

        Ok(Self {
            page_size,
            sort,
            query: lookup("ESTATEHUB_QUERY").unwrap_or(defaults.query),
            log_format,
            user_name: lookup("ESTATEHUB_USER").unwrap_or(defaults.user_name),
            user_email: lookup("ESTATEHUB_EMAIL").unwrap_or(defaults.user_email),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn parses_sort_and_page_size() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ESTATEHUB_PAGE_SIZE", "5"),
            ("ESTATEHUB_SORT", "price:desc"),
            ("ESTATEHUB_LOG_FORMAT", "pretty"),
        ]))
        .unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.sort, Some(SortSpec::descending("price")));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_garbage() {
        assert!(AppConfig::from_lookup(lookup(&[("ESTATEHUB_PAGE_SIZE", "lots")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("ESTATEHUB_SORT", "price:up")])).is_err());
    }
}
