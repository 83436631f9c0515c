//! Curated multi-city travel themes

use serde::{Deserialize, Serialize};

/// A suggested route through several catalog cities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelTheme {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Catalog ids in suggested visiting order
    pub city_ids: Vec<String>,
    /// Suggested length, e.g. "14-21 days"
    pub duration: String,
    pub highlights: Vec<String>,
}

fn theme(
    id: &str,
    name: &str,
    description: &str,
    city_ids: &[&str],
    duration: &str,
    highlights: &[&str],
) -> TravelTheme {
    TravelTheme {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        city_ids: city_ids.iter().map(ToString::to_string).collect(),
        duration: duration.to_string(),
        highlights: highlights.iter().map(ToString::to_string).collect(),
    }
}

/// Themes shipped with the built-in catalog
pub fn builtin_themes() -> Vec<TravelTheme> {
    vec![
        theme(
            "classic-europe",
            "Classic Europe",
            "A route through the most iconic destinations in Europe",
            &["paris", "amsterdam", "berlin", "prague", "vienna", "rome"],
            "14-21 days",
            &["Art and history", "Medieval architecture", "European cuisine"],
        ),
        theme(
            "imperial-capitals",
            "Imperial Capitals",
            "Explore the former capitals of the European empires",
            &["vienna", "berlin", "prague", "rome"],
            "10-14 days",
            &["Imperial palaces", "History museums", "Majestic architecture"],
        ),
        theme(
            "romantic-route",
            "Romantic Route",
            "Cities made for couples and honeymoons",
            &["paris", "prague", "vienna", "rome"],
            "8-12 days",
            &["Romantic atmosphere", "Candlelit dinners", "Charming scenery"],
        ),
        theme(
            "art-and-museums",
            "Art and Museums",
            "For lovers of art and culture",
            &["paris", "amsterdam", "berlin", "vienna", "rome"],
            "12-16 days",
            &["World-class museums", "Art galleries", "Cultural heritage"],
        ),
    ]
}
