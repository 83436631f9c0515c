//! City search over the catalog

use std::sync::Arc;

use tracing::debug;

use crate::catalog::CityCatalog;
use crate::models::CityRecord;

/// Queries shorter than this (in characters) return the whole catalog
pub const MIN_QUERY_CHARS: usize = 2;

/// Case-insensitive substring search on name, country and tags
#[derive(Debug, Clone)]
pub struct CitySearch {
    catalog: Arc<CityCatalog>,
}

impl CitySearch {
    #[must_use]
    pub fn new(catalog: Arc<CityCatalog>) -> Self {
        Self { catalog }
    }

    /// Cities matching `query`, in catalog order.
    ///
    /// An empty or one-character query lists every city. Otherwise a city
    /// matches when its name, its country or any of its tags contains the
    /// query.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<CityRecord> {
        if query.chars().count() < MIN_QUERY_CHARS {
            return self.catalog.all();
        }

        let term = query.to_lowercase();
        let results: Vec<CityRecord> = self
            .catalog
            .iter()
            .filter(|city| Self::matches(city, &term))
            .cloned()
            .collect();

        debug!("Search '{}' matched {} cities", query, results.len());
        results
    }

    fn matches(city: &CityRecord, term: &str) -> bool {
        city.name.to_lowercase().contains(term)
            || city.country.to_lowercase().contains(term)
            || city.tags.iter().any(|tag| tag.to_lowercase().contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn search() -> CitySearch {
        CitySearch::new(Arc::new(CityCatalog::builtin()))
    }

    fn ids(cities: &[CityRecord]) -> Vec<&str> {
        cities.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_search_by_name_prefix() {
        let results = search().search("par");
        assert_eq!(ids(&results), vec!["paris"]);
    }

    #[rstest]
    #[case("")]
    #[case("p")]
    #[case("é")]
    fn test_short_query_returns_whole_catalog(#[case] query: &str) {
        assert_eq!(search().search(query).len(), 7);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(search().search("zzzzz").is_empty());
    }

    #[test]
    fn test_search_by_country() {
        assert_eq!(ids(&search().search("AUSTRIA")), vec!["vienna"]);
    }

    #[test]
    fn test_search_by_tag_keeps_catalog_order() {
        assert_eq!(ids(&search().search("gastro")), vec!["paris", "rome"]);
    }

    #[test]
    fn test_search_matches_any_field() {
        // "ber": Amsterdam via the "liberal" tag, Berlin via its name
        assert_eq!(ids(&search().search("ber")), vec!["amsterdam", "berlin"]);
        // "it": architecture tag, Switzerland, Italy
        assert_eq!(ids(&search().search("it")), vec!["prague", "zurich", "rome"]);
    }
}
