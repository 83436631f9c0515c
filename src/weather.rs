//! Seasonal weather notes
//!
//! Canned, offline weather descriptions derived from the catalog's seasonal
//! temperature bands. Every call returns text; unknown cities get a generic
//! hint instead of an error.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::catalog::CityCatalog;
use crate::models::Season;

/// Text returned for cities the catalog does not know
pub const UNKNOWN_CITY_NOTE: &str = "Check the local forecast";

const BEST_MONTH_ADVICE: &str = "Excellent time to visit!";
const OTHER_MONTH_ADVICE: &str = "Good time, but verify conditions.";

/// Temperature band used when a record has none for the season
fn default_temperature(season: Season) -> &'static str {
    match season {
        Season::Spring => "15-20°C",
        Season::Summer => "20-25°C",
        Season::Autumn => "15-20°C",
        Season::Winter => "5-15°C",
    }
}

fn conditions(season: Season) -> &'static str {
    match season {
        Season::Spring => "mild and pleasant weather",
        Season::Summer => "longer and sunnier days",
        Season::Autumn => "cool weather and colorful scenery",
        Season::Winter => "cold weather, snow possible",
    }
}

/// Produces seasonal weather notes for catalog cities
#[derive(Debug, Clone)]
pub struct SeasonalAdvisor {
    catalog: Arc<CityCatalog>,
}

impl SeasonalAdvisor {
    #[must_use]
    pub fn new(catalog: Arc<CityCatalog>) -> Self {
        Self { catalog }
    }

    /// Weather note for a city in a month (1-12)
    #[must_use]
    pub fn describe(&self, city_id: &str, month: u32) -> String {
        let Some(city) = self.catalog.lookup(city_id) else {
            debug!("No seasonal data for unknown city '{}'", city_id);
            return UNKNOWN_CITY_NOTE.to_string();
        };

        let season = Season::from_month(month);
        let temperature = city
            .seasonal_temperature
            .for_season(season)
            .unwrap_or_else(|| default_temperature(season));
        let advice = if city.is_best_month(month) {
            BEST_MONTH_ADVICE
        } else {
            OTHER_MONTH_ADVICE
        };

        format!(
            "{}: {}, {}. {}",
            season.label(),
            temperature,
            conditions(season),
            advice
        )
    }

    /// Weather note for a stay starting on `start`. Free-form stays without a
    /// catalog id get the generic hint.
    #[must_use]
    pub fn note_for_stay(&self, city_id: Option<&str>, start: NaiveDate) -> String {
        match city_id {
            Some(id) => self.describe(id, start.month()),
            None => UNKNOWN_CITY_NOTE.to_string(),
        }
    }
}
