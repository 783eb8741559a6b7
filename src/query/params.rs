//! Raw query parameter sets
//!
//! A [`QueryParams`] is the untyped name/value mapping a collaborator lifts
//! off the request line. The reserved `page` and `limit` names control
//! paging; everything else becomes a filter predicate.

use crate::registry::config::RegistryConfig;

/// Reserved name selecting the 1-based page to return
pub const PAGE_PARAM: &str = "page";

/// Reserved name bounding the number of records per page
pub const LIMIT_PARAM: &str = "limit";

/// An ordered set of raw query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

/// Paging controls extracted from a parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Paging {
    pub page: usize,
    pub limit: usize,
}

impl QueryParams {
    /// An empty parameter set (matches everything, first page)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Build from an iterator of name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Filter predicates: every entry except the reserved paging names
    pub(crate) fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(name, _)| name != PAGE_PARAM && name != LIMIT_PARAM)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Resolve paging controls against the registry configuration
    ///
    /// Unparseable or out-of-range values fall back to defaults; `limit`
    /// is clamped to the configured maximum.
    pub(crate) fn paging(&self, config: &RegistryConfig) -> Paging {
        let page = self
            .lookup(PAGE_PARAM)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let limit = self
            .lookup(LIMIT_PARAM)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);
        Paging { page, limit }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_defaults() {
        let config = RegistryConfig::default();
        let paging = QueryParams::new().paging(&config);
        assert_eq!(paging.page, 1);
        assert_eq!(paging.limit, config.default_page_size);
    }

    #[test]
    fn test_paging_parses_and_clamps() {
        let config = RegistryConfig::default();

        let paging = QueryParams::new()
            .with("page", "3")
            .with("limit", "25")
            .paging(&config);
        assert_eq!(paging.page, 3);
        assert_eq!(paging.limit, 25);

        let over = QueryParams::new().with("limit", "100000").paging(&config);
        assert_eq!(over.limit, config.max_page_size);
    }

    #[test]
    fn test_paging_ignores_garbage_values() {
        let config = RegistryConfig::default();
        let paging = QueryParams::new()
            .with("page", "zero")
            .with("limit", "0")
            .paging(&config);
        assert_eq!(paging.page, 1);
        assert_eq!(paging.limit, config.default_page_size);
    }

    #[test]
    fn test_filters_exclude_reserved_names() {
        let params = QueryParams::new()
            .with("page", "2")
            .with("label", "Garish")
            .with("limit", "5")
            .with("format", "audio");
        let filters: Vec<_> = params.filters().collect();
        assert_eq!(filters, vec![("label", "Garish"), ("format", "audio")]);
    }
}
