//! Built-in city dataset

use crate::models::{CityRecord, Coordinates, SeasonalTemperature};

struct CitySeed {
    id: &'static str,
    name: &'static str,
    country: &'static str,
    country_code: &'static str,
    lat: f64,
    lng: f64,
    timezone: &'static str,
    currency: &'static str,
    language: &'static str,
    description: &'static str,
    highlights: &'static [&'static str],
    best_months: &'static [u32],
    // spring, summer, autumn, winter
    temperatures: [&'static str; 4],
    tags: &'static [&'static str],
}

const SEEDS: &[CitySeed] = &[
    CitySeed {
        id: "paris",
        name: "Paris",
        country: "France",
        country_code: "FR",
        lat: 48.8566,
        lng: 2.3522,
        timezone: "Europe/Paris",
        currency: "EUR",
        language: "French",
        description: "The City of Light, famous for the Eiffel Tower, the Louvre and Parisian charm",
        highlights: &["Eiffel Tower", "Louvre Museum", "Champs-Élysées", "Arc de Triomphe", "Montmartre"],
        best_months: &[4, 5, 6, 9, 10],
        temperatures: ["15-20°C", "20-25°C", "15-20°C", "5-10°C"],
        tags: &["romance", "art", "history", "gastronomy"],
    },
    CitySeed {
        id: "amsterdam",
        name: "Amsterdam",
        country: "Netherlands",
        country_code: "NL",
        lat: 52.3676,
        lng: 4.9041,
        timezone: "Europe/Amsterdam",
        currency: "EUR",
        language: "Dutch",
        description: "City of canals, remarkable museums and a unique atmosphere",
        highlights: &["Canals", "Van Gogh Museum", "Anne Frank House", "Red Light District", "Vondelpark"],
        best_months: &[4, 5, 6, 7, 8, 9],
        temperatures: ["10-15°C", "15-22°C", "10-15°C", "2-8°C"],
        tags: &["canals", "museums", "bicycles", "liberal"],
    },
    CitySeed {
        id: "berlin",
        name: "Berlin",
        country: "Germany",
        country_code: "DE",
        lat: 52.5200,
        lng: 13.4050,
        timezone: "Europe/Berlin",
        currency: "EUR",
        language: "German",
        description: "German capital rich in history, art and vibrant nightlife",
        highlights: &["Brandenburg Gate", "Berlin Wall", "Museum Island", "Reichstag", "East Side Gallery"],
        best_months: &[5, 6, 7, 8, 9],
        temperatures: ["10-18°C", "18-24°C", "10-18°C", "0-5°C"],
        tags: &["history", "art", "nightlife", "culture"],
    },
    CitySeed {
        id: "prague",
        name: "Prague",
        country: "Czech Republic",
        country_code: "CZ",
        lat: 50.0755,
        lng: 14.4378,
        timezone: "Europe/Prague",
        currency: "CZK",
        language: "Czech",
        description: "Enchanting medieval city known as the 'Golden City'",
        highlights: &["Prague Castle", "Charles Bridge", "Old Town Square", "Astronomical Clock", "Jewish Quarter"],
        best_months: &[4, 5, 6, 9, 10],
        temperatures: ["8-18°C", "15-25°C", "8-18°C", "-2-5°C"],
        tags: &["medieval", "castles", "beer", "architecture"],
    },
    CitySeed {
        id: "vienna",
        name: "Vienna",
        country: "Austria",
        country_code: "AT",
        lat: 48.2082,
        lng: 16.3738,
        timezone: "Europe/Vienna",
        currency: "EUR",
        language: "German",
        description: "Imperial Austrian capital, famous for classical music and architecture",
        highlights: &["Schönbrunn Palace", "Vienna State Opera", "St. Stephen's Cathedral", "Belvedere Palace", "Prater"],
        best_months: &[4, 5, 6, 9, 10],
        temperatures: ["10-20°C", "18-26°C", "10-20°C", "0-8°C"],
        tags: &["imperial", "music", "palaces", "cafes"],
    },
    CitySeed {
        id: "zurich",
        name: "Zurich",
        country: "Switzerland",
        country_code: "CH",
        lat: 47.3769,
        lng: 8.5417,
        timezone: "Europe/Zurich",
        currency: "CHF",
        language: "German",
        description: "Swiss financial hub surrounded by stunning alpine scenery",
        highlights: &["Lake Zurich", "Old Town", "Grossmünster", "Bahnhofstrasse", "Uetliberg"],
        best_months: &[5, 6, 7, 8, 9],
        temperatures: ["8-18°C", "15-24°C", "8-18°C", "0-6°C"],
        tags: &["lakes", "mountains", "luxury", "nature"],
    },
    CitySeed {
        id: "rome",
        name: "Rome",
        country: "Italy",
        country_code: "IT",
        lat: 41.9028,
        lng: 12.4964,
        timezone: "Europe/Rome",
        currency: "EUR",
        language: "Italian",
        description: "The Eternal City, cradle of western civilization and Renaissance art",
        highlights: &["Colosseum", "Vatican", "Trevi Fountain", "Pantheon", "Roman Forum"],
        best_months: &[4, 5, 6, 9, 10],
        temperatures: ["15-22°C", "22-30°C", "15-22°C", "8-15°C"],
        tags: &["history", "art", "religion", "gastronomy"],
    },
];

impl CitySeed {
    fn to_record(&self) -> CityRecord {
        let [spring, summer, autumn, winter] = self.temperatures;
        CityRecord {
            id: self.id.to_string(),
            name: self.name.to_string(),
            country: self.country.to_string(),
            country_code: self.country_code.to_string(),
            continent: "Europe".to_string(),
            coordinates: Coordinates::new(self.lat, self.lng),
            timezone: self.timezone.to_string(),
            currency: self.currency.to_string(),
            language: self.language.to_string(),
            description: self.description.to_string(),
            highlights: self.highlights.iter().map(ToString::to_string).collect(),
            seasonal_temperature: SeasonalTemperature::new(spring, summer, autumn, winter),
            best_months: self.best_months.to_vec(),
            tags: self.tags.iter().map(ToString::to_string).collect(),
        }
    }
}

/// The cities shipped with the library, in catalog order
pub fn builtin_cities() -> Vec<CityRecord> {
    SEEDS.iter().map(CitySeed::to_record).collect()
}
