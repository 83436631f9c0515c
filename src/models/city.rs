//! City catalog records, coordinates and seasons

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude, -90 to 90
    pub lat: f64,
    /// Longitude, -180 to 180
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are inside their degree ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Format as a `lat, lng` string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Northern-hemisphere season of a calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Map a month (1-12) to its season. Anything outside 3..=11 is winter.
    #[must_use]
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

/// Typical temperature range per season, as display text
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SeasonalTemperature {
    pub spring: Option<String>,
    pub summer: Option<String>,
    pub autumn: Option<String>,
    pub winter: Option<String>,
}

impl SeasonalTemperature {
    /// Ranges for all four seasons
    #[must_use]
    pub fn new(spring: &str, summer: &str, autumn: &str, winter: &str) -> Self {
        Self {
            spring: Some(spring.to_string()),
            summer: Some(summer.to_string()),
            autumn: Some(autumn.to_string()),
            winter: Some(winter.to_string()),
        }
    }

    /// Range text for a season, if the record carries one
    #[must_use]
    pub fn for_season(&self, season: Season) -> Option<&str> {
        match season {
            Season::Spring => self.spring.as_deref(),
            Season::Summer => self.summer.as_deref(),
            Season::Autumn => self.autumn.as_deref(),
            Season::Winter => self.winter.as_deref(),
        }
    }
}

/// A known city in the catalog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    /// Unique lowercase slug
    pub id: String,
    pub name: String,
    pub country: String,
    /// ISO 3166-1 alpha-2
    pub country_code: String,
    pub continent: String,
    pub coordinates: Coordinates,
    pub timezone: String,
    pub currency: String,
    pub language: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub seasonal_temperature: SeasonalTemperature,
    /// Months (1-12) recommended for a visit
    pub best_months: Vec<u32>,
    /// Lowercase keywords
    pub tags: Vec<String>,
}

impl CityRecord {
    /// Whether `month` is one of the recommended months
    #[must_use]
    pub fn is_best_month(&self, month: u32) -> bool {
        self.best_months.contains(&month)
    }

    /// Case-insensitive exact tag match
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    /// `Name, Country` display label
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(3, Season::Spring)]
    #[case(5, Season::Spring)]
    #[case(6, Season::Summer)]
    #[case(8, Season::Summer)]
    #[case(9, Season::Autumn)]
    #[case(11, Season::Autumn)]
    #[case(12, Season::Winter)]
    #[case(1, Season::Winter)]
    #[case(2, Season::Winter)]
    fn test_season_from_month(#[case] month: u32, #[case] expected: Season) {
        assert_eq!(Season::from_month(month), expected);
    }

    #[test]
    fn test_coordinates_validity() {
        assert!(Coordinates::new(48.8566, 2.3522).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
    }

    #[test]
    fn test_seasonal_temperature_lookup() {
        let temps = SeasonalTemperature {
            summer: Some("20-25°C".to_string()),
            ..Default::default()
        };
        assert_eq!(temps.for_season(Season::Summer), Some("20-25°C"));
        assert_eq!(temps.for_season(Season::Winter), None);
    }

    #[test]
    fn test_city_record_serializes_camel_case() {
        let record = CityRecord {
            id: "paris".to_string(),
            name: "Paris".to_string(),
            country: "France".to_string(),
            country_code: "FR".to_string(),
            continent: "Europe".to_string(),
            coordinates: Coordinates::new(48.8566, 2.3522),
            timezone: "Europe/Paris".to_string(),
            currency: "EUR".to_string(),
            language: "French".to_string(),
            description: String::new(),
            highlights: vec![],
            seasonal_temperature: SeasonalTemperature::default(),
            best_months: vec![4, 5],
            tags: vec!["Art".to_string()],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["countryCode"], "FR");
        assert!(json.get("bestMonths").is_some());
        assert!(record.has_tag("art"));
        assert!(record.is_best_month(5));
        assert!(!record.is_best_month(12));
        assert_eq!(record.display_name(), "Paris, France");
    }
}
