//! City catalog
//!
//! An immutable table of known cities, built once at startup and shared
//! (behind an `Arc`) with search, the weather advisor and the itinerary
//! planner. Every lookup is case-insensitive and returns owned copies, so
//! callers can never mutate the table. A miss is an empty result, not an error.

pub mod data;
pub mod themes;

use std::collections::HashSet;

use tracing::debug;

use crate::ViajarteError;
use crate::models::CityRecord;

pub use themes::TravelTheme;

/// Read-only table of known cities, in catalog order
#[derive(Debug, Clone)]
pub struct CityCatalog {
    cities: Vec<CityRecord>,
    themes: Vec<TravelTheme>,
}

impl CityCatalog {
    /// Build a catalog from records, checking id uniqueness and coordinates
    pub fn new(cities: Vec<CityRecord>) -> crate::Result<Self> {
        let mut seen = HashSet::new();
        for city in &cities {
            if !seen.insert(city.id.to_lowercase()) {
                return Err(ViajarteError::validation(format!(
                    "Duplicate city id '{}' in catalog",
                    city.id
                )));
            }
            if !city.coordinates.is_valid() {
                return Err(ViajarteError::validation(format!(
                    "City '{}' has invalid coordinates ({})",
                    city.id,
                    city.coordinates.format()
                )));
            }
        }

        debug!("Built city catalog with {} cities", cities.len());
        Ok(Self {
            cities,
            themes: Vec::new(),
        })
    }

    /// The catalog shipped with the library, including its travel themes
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            cities: data::builtin_cities(),
            themes: themes::builtin_themes(),
        }
    }

    /// Attach travel themes to this catalog
    #[must_use]
    pub fn with_themes(mut self, themes: Vec<TravelTheme>) -> Self {
        self.themes = themes;
        self
    }

    /// Number of cities
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Borrowing iterator in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &CityRecord> {
        self.cities.iter()
    }

    /// Borrowed record by id
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&CityRecord> {
        let id = id.to_lowercase();
        self.cities.iter().find(|c| c.id.to_lowercase() == id)
    }

    /// Record by id
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<CityRecord> {
        self.lookup(id).cloned()
    }

    /// Record whose name equals `name`, ignoring case
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CityRecord> {
        let name = name.trim().to_lowercase();
        self.cities
            .iter()
            .find(|c| c.name.to_lowercase() == name)
            .cloned()
    }

    /// All records in catalog order
    #[must_use]
    pub fn all(&self) -> Vec<CityRecord> {
        self.cities.clone()
    }

    /// Records whose country contains `country`. Empty input yields nothing.
    #[must_use]
    pub fn by_country(&self, country: &str) -> Vec<CityRecord> {
        if country.is_empty() {
            return Vec::new();
        }
        let country = country.to_lowercase();
        self.cities
            .iter()
            .filter(|c| c.country.to_lowercase().contains(&country))
            .cloned()
            .collect()
    }

    /// Records carrying `tag`. Empty input yields nothing.
    #[must_use]
    pub fn by_tag(&self, tag: &str) -> Vec<CityRecord> {
        if tag.is_empty() {
            return Vec::new();
        }
        self.cities
            .iter()
            .filter(|c| c.has_tag(tag))
            .cloned()
            .collect()
    }

    /// Distinct country names, sorted
    #[must_use]
    pub fn countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self
            .cities
            .iter()
            .map(|c| c.country.clone())
            .filter(|c| !c.is_empty())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        countries.sort();
        countries
    }

    /// Travel themes attached to this catalog
    #[must_use]
    pub fn travel_themes(&self) -> &[TravelTheme] {
        &self.themes
    }

    /// Theme by id, ignoring case
    #[must_use]
    pub fn theme(&self, id: &str) -> Option<&TravelTheme> {
        let id = id.to_lowercase();
        self.themes.iter().find(|t| t.id == id)
    }

    /// Catalog records of a theme in route order; unknown ids are skipped
    #[must_use]
    pub fn theme_cities(&self, theme: &TravelTheme) -> Vec<CityRecord> {
        theme
            .city_ids
            .iter()
            .filter_map(|id| self.get_by_id(id))
            .collect()
    }
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = CityCatalog::builtin();
        let rebuilt = CityCatalog::new(catalog.all());
        assert!(rebuilt.is_ok());
        assert_eq!(catalog.len(), 7);
        assert!(catalog.iter().all(|c| c.id == c.id.to_lowercase()));
    }

    #[test]
    fn test_get_by_id_ignores_case() {
        let catalog = CityCatalog::builtin();
        assert_eq!(catalog.get_by_id("PARIS").unwrap().name, "Paris");
        assert!(catalog.get_by_id("atlantis").is_none());
    }

    #[test]
    fn test_returned_records_are_copies() {
        let catalog = CityCatalog::builtin();
        let mut paris = catalog.get_by_id("paris").unwrap();
        paris.name = "Changed".to_string();
        assert_eq!(catalog.get_by_id("paris").unwrap().name, "Paris");
    }

    #[test]
    fn test_by_country_and_tag() {
        let catalog = CityCatalog::builtin();
        let italy = catalog.by_country("ITA");
        assert_eq!(italy.len(), 1);
        assert_eq!(italy[0].id, "rome");

        let art: Vec<String> = catalog.by_tag("Art").into_iter().map(|c| c.id).collect();
        assert_eq!(art, vec!["paris", "berlin", "rome"]);

        assert!(catalog.by_country("").is_empty());
        assert!(catalog.by_tag("").is_empty());
        assert!(catalog.by_tag("volcanoes").is_empty());
    }

    #[test]
    fn test_countries_sorted_and_unique() {
        let catalog = CityCatalog::builtin();
        let countries = catalog.countries();
        assert_eq!(countries.len(), 7);
        let mut sorted = countries.clone();
        sorted.sort();
        assert_eq!(countries, sorted);
    }

    #[test]
    fn test_find_by_name() {
        let catalog = CityCatalog::builtin();
        assert_eq!(catalog.find_by_name(" vienna ").unwrap().id, "vienna");
        assert!(catalog.find_by_name("Vien").is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut cities = CityCatalog::builtin().all();
        let mut copy = cities[0].clone();
        copy.id = "PARIS".to_string();
        cities.push(copy);
        assert!(CityCatalog::new(cities).is_err());
    }

    #[test]
    fn test_rejects_invalid_coordinates() {
        let mut cities = CityCatalog::builtin().all();
        cities[0].coordinates = Coordinates::new(120.0, 0.0);
        let err = CityCatalog::new(cities).unwrap_err();
        assert!(err.to_string().contains("invalid coordinates"));
    }

    #[test]
    fn test_theme_cities_skip_unknown_ids() {
        let catalog = CityCatalog::builtin();
        let mut theme = catalog.theme("romantic-route").unwrap().clone();
        theme.city_ids.push("atlantis".to_string());
        let cities = catalog.theme_cities(&theme);
        let ids: Vec<&str> = cities.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["paris", "prague", "vienna", "rome"]);
    }

    #[test]
    fn test_custom_catalog_themes() {
        let catalog = CityCatalog::new(CityCatalog::builtin().all()).unwrap();
        assert!(catalog.travel_themes().is_empty());
        assert!(catalog.theme("classic-europe").is_none());

        let themed = catalog.with_themes(themes::builtin_themes());
        assert_eq!(themed.travel_themes().len(), 4);
        let classic = themed.theme("CLASSIC-EUROPE").unwrap();
        assert!(!themed.theme_cities(classic).is_empty());
    }
}
